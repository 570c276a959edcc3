use std::fs;

use predicates::prelude::PredicateBooleanExt;
use predicates::str::contains;
use tempfile::TempDir;

/// The binary, run from an empty directory with AWS lookups kept local.
fn aws_scenarios(dir: &TempDir) -> assert_cmd::Command {
    let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("aws-scenarios");
    cmd.current_dir(dir.path())
        .env("AWS_EC2_METADATA_DISABLED", "true")
        .env("AWS_CONFIG_FILE", dir.path().join("aws-config"))
        .env("AWS_SHARED_CREDENTIALS_FILE", dir.path().join("aws-credentials"))
        .env("AWS_SCENARIOS_NO_TTY", "1")
        .env_remove("RUST_LOG")
        .args(["--region", "us-east-1"]);
    cmd
}

fn workdir() -> TempDir {
    TempDir::new().expect("create temp dir")
}

#[test]
fn help_lists_commands_and_exits_zero() {
    let dir = workdir();

    aws_scenarios(&dir)
        .arg("--help")
        .assert()
        .success()
        .stdout(
            contains("step-functions")
                .and(contains("s3-basics"))
                .and(contains("sample")),
        );
}

#[test]
fn version_exits_zero() {
    let dir = workdir();

    aws_scenarios(&dir)
        .arg("--version")
        .assert()
        .success()
        .stdout(contains("aws-scenarios"));
}

#[test]
fn sample_help_lists_every_operation() {
    let dir = workdir();

    let assert = aws_scenarios(&dir).args(["sample", "--help"]).assert();

    let mut assert = assert.success();
    for name in [
        "s3-list-buckets",
        "s3-put-object",
        "sqs-send-batch",
        "kms-create-alias",
        "kms-revoke-grant",
        "ses-create-receipt-rule",
        "ses-delete-identity",
        "sts-assume-role",
        "dynamodb-scan",
        "bedrock-converse",
        "sagemaker-create-model",
        "mediaconvert-create-job",
    ] {
        assert = assert.stdout(contains(name));
    }
}

#[test]
fn unknown_command_exits_one() {
    let dir = workdir();

    aws_scenarios(&dir)
        .arg("lambda-basics")
        .assert()
        .code(1)
        .stderr(contains("unrecognized subcommand"));
}

#[test]
fn missing_required_argument_exits_one() {
    let dir = workdir();

    aws_scenarios(&dir)
        .args(["sample", "kms-create-alias", "--key-id", "k"])
        .assert()
        .code(1)
        .stderr(contains("--alias-name"));
}

#[test]
fn s3_basics_requires_a_bucket() {
    let dir = workdir();

    aws_scenarios(&dir)
        .args(["s3-basics", "--file", "q3.csv"])
        .assert()
        .code(1)
        .stderr(contains("--bucket"));
}

#[test]
fn missing_config_file_is_reported() {
    let dir = workdir();

    aws_scenarios(&dir)
        .args(["--config", "absent.toml", "sample", "s3-list-buckets"])
        .assert()
        .code(1)
        .stderr(contains("error: failed to read config file").and(contains("caused by:")));
}

#[test]
fn invalid_config_in_working_directory_is_reported() {
    let dir = workdir();
    fs::write(
        dir.path().join("aws-scenarios.toml"),
        "[step_functions]\nmax_polls = \"many\"\n",
    )
    .expect("write config");

    aws_scenarios(&dir)
        .args(["sample", "s3-list-buckets"])
        .assert()
        .code(1)
        .stderr(contains("invalid config file").and(contains("aws-scenarios.toml")));
}

#[test]
fn oversized_sqs_batch_is_rejected_before_sending() {
    let dir = workdir();
    let mut cmd = aws_scenarios(&dir);
    cmd.args(["sample", "sqs-send-batch", "--queue-url", "https://sqs.invalid/q"]);
    for i in 0..11 {
        cmd.args(["--message", &format!("message {i}")]);
    }

    cmd.assert()
        .code(1)
        .stderr(contains("a batch holds 1 to 10 messages, got 11"));
}

#[test]
fn malformed_kms_alias_is_rejected() {
    let dir = workdir();

    aws_scenarios(&dir)
        .args([
            "sample",
            "kms-create-alias",
            "--alias-name",
            "my-key",
            "--key-id",
            "1234abcd",
        ])
        .assert()
        .code(1)
        .stderr(contains("alias/<name>"));
}

#[test]
fn put_object_with_missing_file_fails() {
    let dir = workdir();

    aws_scenarios(&dir)
        .args([
            "sample",
            "s3-put-object",
            "--bucket",
            "bucket",
            "--key",
            "key",
            "--file",
            "no-such-file.txt",
        ])
        .assert()
        .code(1)
        .stderr(contains("IO error"));
}

#[test]
fn transcode_job_needs_s3_urls() {
    let dir = workdir();

    aws_scenarios(&dir)
        .args([
            "sample",
            "mediaconvert-create-job",
            "--role-arn",
            "arn:aws:iam::123456789012:role/mc",
            "--input",
            "/videos/in.mov",
            "--output",
            "s3://out/",
        ])
        .assert()
        .code(1)
        .stderr(contains("input must be an s3:// URL"));
}

#[test]
fn zero_max_polls_is_a_usage_error() {
    let dir = workdir();

    aws_scenarios(&dir)
        .args(["step-functions", "--max-polls", "0"])
        .assert()
        .code(1)
        .stderr(contains("--max-polls must be at least 1"));
}

#[test]
fn zero_max_polls_in_config_file_is_rejected() {
    let dir = workdir();
    fs::write(
        dir.path().join("aws-scenarios.toml"),
        "[step_functions]\nmax_polls = 0\n",
    )
    .expect("write config");

    aws_scenarios(&dir)
        .arg("step-functions")
        .assert()
        .code(1)
        .stderr(contains("invalid config file").and(contains("max_polls")));
}
