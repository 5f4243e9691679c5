use resolver_guard_app::cli::CheckArgs;
use resolver_guard_app::commands::{run_check, run_validate, Outcome};
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

const POLICY: &str = r#"
identities:
  - id: editor
    permissions:
      - name: car-manufacturers
        rwd: rw
tokens:
  editor-token: editor
"#;

fn policy_dir() -> (TempDir, PathBuf) {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("policy.yaml");
    fs::write(&path, POLICY).unwrap();
    (temp, path)
}

fn check(policy: PathBuf, token: Option<&str>, action: &str) -> CheckArgs {
    CheckArgs {
        policy,
        token: token.map(str::to_string),
        resource: "car-manufacturers".to_string(),
        action: action.to_string(),
        locale: None,
        audit: None,
    }
}

#[tokio::test]
async fn test_check_allowed() {
    let (_temp, policy) = policy_dir();
    let outcome = run_check(&check(policy, Some("editor-token"), "read")).await.unwrap();
    assert_eq!(outcome, Outcome::Allowed);
}

#[tokio::test]
async fn test_check_denied() {
    let (_temp, policy) = policy_dir();
    let outcome = run_check(&check(policy.clone(), Some("editor-token"), "delete"))
        .await
        .unwrap();
    assert_eq!(outcome, Outcome::Denied);

    let outcome = run_check(&check(policy, None, "read")).await.unwrap();
    assert_eq!(outcome, Outcome::Denied);
}

#[tokio::test]
async fn test_unknown_action_is_error_not_denial() {
    let (_temp, policy) = policy_dir();
    let err = run_check(&check(policy, Some("editor-token"), "publish"))
        .await
        .unwrap_err();
    assert!(format!("{:#}", err).contains("Unknown action"));
}

#[tokio::test]
async fn test_check_writes_audit_log() {
    let (temp, policy) = policy_dir();
    let audit = temp.path().join("audit").join("decisions.log");
    let mut args = check(policy, Some("editor-token"), "write");
    args.audit = Some(audit.clone());

    run_check(&args).await.unwrap();
    let log = fs::read_to_string(audit).unwrap();
    assert!(log.contains("\"principal\":\"user:editor\""));
}

#[test]
fn test_validate_counts_identities() {
    let (_temp, policy) = policy_dir();
    assert_eq!(run_validate(&policy).unwrap(), 1);
}

#[test]
fn test_validate_missing_file() {
    let temp = TempDir::new().unwrap();
    assert!(run_validate(&temp.path().join("missing.yaml")).is_err());
}
