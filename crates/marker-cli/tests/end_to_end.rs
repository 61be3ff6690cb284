//! Full runs against a mock chat completion endpoint.

use serde_json::{json, Value};
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use marker_cli::{run, RunOptions};

const PROBLEMS: &str = "\
problem_index,Question,Answer,generated_answer
1,What is 2+2?,4,4.0
2,Is the square root of 2 irrational?,Yes,\"Yes, by contradiction...\"
3,What is 5-1?,4
4,What is 3*3?,9,8
";

const JUDGE_REPLY: &str = "\
1. Numerical Analysis: CORRECT
2. Logical Reasoning: CORRECT
3. Axiomatic Proof: CORRECT
4. Contradiction Proof: CORRECT
5. Contrapositive Proof: INCORRECT";

struct Workspace {
    dir: TempDir,
}

impl Workspace {
    fn new(base_url: &str) -> Self {
        let dir = tempfile::tempdir().unwrap();
        let config = json!({
            "base_url": base_url,
            "api_key": "sk-end-to-end",
            "model": "judge-model",
            "question_answers_output": dir.path().join("question_answers.json"),
            "evaluation_output": dir.path().join("evaluation.json"),
            "timeout": "5s"
        });
        fs::write(dir.path().join("config.json"), config.to_string()).unwrap();
        fs::write(dir.path().join("problems.csv"), PROBLEMS).unwrap();
        Self { dir }
    }

    fn path(&self, name: &str) -> PathBuf {
        self.dir.path().join(name)
    }

    fn options(&self) -> RunOptions {
        RunOptions {
            config_path: self.path("config.json"),
            input_path: self.path("problems.csv"),
        }
    }
}

fn read_json(path: &Path) -> Value {
    serde_json::from_str(&fs::read_to_string(path).unwrap()).unwrap()
}

fn indices(results: &Value) -> Vec<&str> {
    results
        .as_array()
        .unwrap()
        .iter()
        .map(|r| r["problem_index"].as_str().unwrap())
        .collect()
}

fn completion(content: &str) -> Value {
    json!({
        "id": "chatcmpl-1",
        "object": "chat.completion",
        "model": "judge-model",
        "choices": [{
            "index": 0,
            "message": {"role": "assistant", "content": content},
            "finish_reason": "stop"
        }],
        "usage": {"prompt_tokens": 200, "completion_tokens": 40, "total_tokens": 240}
    })
}

#[tokio::test]
async fn test_full_run_writes_both_outputs() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .and(header("authorization", "Bearer sk-end-to-end"))
        .respond_with(ResponseTemplate::new(200).set_body_json(completion(JUDGE_REPLY)))
        .expect(1)
        .mount(&server)
        .await;

    let workspace = Workspace::new(&server.uri());
    let report = run(&workspace.options()).await.unwrap();

    assert_eq!(report.summary.processed, 3);
    assert_eq!(report.summary.skipped, 1);
    assert_eq!(report.summary.correct, 2);
    assert_eq!(report.usage.llm_calls, 1);
    assert_eq!(report.usage.total_tokens, 240);

    let qa = read_json(&workspace.path("question_answers.json"));
    assert_eq!(indices(&qa), vec!["1", "2", "4"]);
    assert_eq!(qa[1]["generated_answer"], "Yes, by contradiction...");
    assert!(qa[0]["timestamp"].is_string());

    let evaluation = read_json(&workspace.path("evaluation.json"));
    assert_eq!(indices(&evaluation), vec!["1", "2", "4"]);
    assert_eq!(
        evaluation[0]["evaluation"],
        json!({"comparison": "4.0 == 4", "result": true, "confidence": 1.0})
    );
    assert_eq!(evaluation[1]["evaluation"]["result"], true);
    assert_eq!(evaluation[1]["evaluation"]["confidence"], 0.8);
    assert_eq!(evaluation[2]["evaluation"]["result"], false);
    assert_eq!(evaluation[2]["evaluation"]["comparison"], "8 == 9");
}

#[tokio::test]
async fn test_provider_failure_is_recorded_per_row() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(ResponseTemplate::new(500).set_body_string("upstream exploded"))
        .expect(1)
        .mount(&server)
        .await;

    let workspace = Workspace::new(&server.uri());
    let report = run(&workspace.options()).await.unwrap();

    assert_eq!(report.summary.processed, 3);
    assert_eq!(report.usage.failed_calls, 1);

    let evaluation = read_json(&workspace.path("evaluation.json"));
    assert_eq!(indices(&evaluation), vec!["1", "2", "4"]);

    let failed = &evaluation[1]["evaluation"];
    assert_eq!(failed["result"], false);
    assert_eq!(failed["confidence"], 0.0);
    assert!(failed["explanation"]
        .as_str()
        .unwrap()
        .starts_with("Error: "));
}

#[tokio::test]
async fn test_missing_config_aborts() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("problems.csv"), PROBLEMS).unwrap();

    let result = run(&RunOptions {
        config_path: dir.path().join("config.json"),
        input_path: dir.path().join("problems.csv"),
    })
    .await;

    assert!(result.is_err());
}

#[tokio::test]
async fn test_missing_input_leaves_outputs_untouched() {
    let workspace = Workspace::new("http://127.0.0.1:9");
    fs::remove_file(workspace.path("problems.csv")).unwrap();

    let result = run(&workspace.options()).await;

    assert!(result.is_err());
    assert!(!workspace.path("question_answers.json").exists());
    assert!(!workspace.path("evaluation.json").exists());
}
