//! Shared test utilities for Luver Core integration tests.
//!
//! [`ScriptedRunner`] stands in for both the `luis` and `ludown` tools. It
//! answers from a script, records every call, and creates the files the real
//! converter would create.

#![allow(dead_code)]

use async_trait::async_trait;
use luver_core::{AppConfig, CommandOutput, CommandRunner, ProgressEvent, ProgressSink, SyncResult};
use std::collections::{HashSet, VecDeque};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

pub const APP_JSON: &str = r#"{"id": "app-1", "name": "Bot", "description": "Test bot", "culture": "en-us"}"#;

/// One recorded invocation.
#[derive(Debug, Clone)]
pub struct Call {
    pub program: String,
    pub args: Vec<String>,
}

impl Call {
    /// Leading words before the first flag, e.g. `train version` or `refresh`.
    pub fn operation(&self) -> String {
        self.args.iter().take(2).take_while(|a| !a.starts_with('-')).cloned().collect::<Vec<_>>().join(" ")
    }

    pub fn flag(&self, name: &str) -> Option<&str> {
        self.args.iter().position(|a| a == name).and_then(|i| self.args.get(i + 1)).map(String::as_str)
    }
}

#[derive(Debug)]
struct Script {
    application: CommandOutput,
    existing: HashSet<String>,
    statuses: VecDeque<String>,
    last_status: String,
    converter_output: CommandOutput,
    versions: Vec<String>,
    export_payload: String,
    import_output: CommandOutput,
    imported_files_existed: Vec<bool>,
}

#[derive(Debug)]
pub struct ScriptedRunner {
    script: Mutex<Script>,
    calls: Mutex<Vec<Call>>,
}

impl Default for ScriptedRunner {
    fn default() -> Self {
        Self::new()
    }
}

impl ScriptedRunner {
    pub fn new() -> Self {
        Self {
            script: Mutex::new(Script {
                application: CommandOutput::ok(APP_JSON),
                existing: HashSet::new(),
                statuses: VecDeque::new(),
                last_status: r#"[{"modelId": "m1", "details": {"statusId": 0}}]"#.to_string(),
                converter_output: CommandOutput::ok(""),
                versions: vec!["0.1".to_string()],
                export_payload: r#"{"luis_schema_version": "3.0.0", "versionId": "0.1"}"#.to_string(),
                import_output: CommandOutput::ok(r#""imported""#),
                imported_files_existed: Vec::new(),
            }),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn with_application(self, output: CommandOutput) -> Self {
        self.script.lock().unwrap().application = output;
        self
    }

    pub fn with_existing_version(self, version_id: &str) -> Self {
        self.script.lock().unwrap().existing.insert(version_id.to_string());
        self
    }

    /// Status payloads for successive `get status` calls built from status
    /// codes, one part per code. The last payload repeats once exhausted.
    pub fn with_status_codes(self, polls: &[&[i64]]) -> Self {
        let payloads: Vec<String> = polls.iter().map(|codes| status_payload(codes)).collect();
        self.with_status_payloads(&payloads)
    }

    pub fn with_status_payloads(self, payloads: &[String]) -> Self {
        {
            let mut script = self.script.lock().unwrap();
            script.statuses = payloads.iter().cloned().collect();
            if let Some(last) = payloads.last() {
                script.last_status.clone_from(last);
            }
        }
        self
    }

    pub fn with_converter_output(self, output: CommandOutput) -> Self {
        self.script.lock().unwrap().converter_output = output;
        self
    }

    pub fn with_import_output(self, output: CommandOutput) -> Self {
        self.script.lock().unwrap().import_output = output;
        self
    }

    pub fn with_versions(self, versions: &[&str]) -> Self {
        self.script.lock().unwrap().versions = versions.iter().map(|v| (*v).to_string()).collect();
        self
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    pub fn operations(&self) -> Vec<String> {
        self.calls().iter().map(Call::operation).collect()
    }

    pub fn count(&self, operation: &str) -> usize {
        self.operations().iter().filter(|op| op.as_str() == operation).count()
    }

    /// Whether the `--in` file existed at the moment each import ran.
    pub fn imported_files_existed(&self) -> Vec<bool> {
        self.script.lock().unwrap().imported_files_existed.clone()
    }

    fn luis(&self, call: &Call) -> CommandOutput {
        let mut script = self.script.lock().unwrap();
        let version = call.flag("--versionId").map(str::to_string);
        match call.operation().as_str() {
            "get application" => script.application.clone(),
            "get version" => {
                if version.is_some_and(|v| script.existing.contains(&v)) {
                    CommandOutput::ok(r#"{"version": "x"}"#)
                } else {
                    CommandOutput::failed(1, "The versionId is not valid")
                }
            }
            "import version" => {
                let existed = call.flag("--in").is_some_and(|p| Path::new(p).is_file());
                script.imported_files_existed.push(existed);
                if script.import_output.success() {
                    if let Some(v) = version {
                        script.existing.insert(v);
                    }
                }
                script.import_output.clone()
            }
            "delete version" => {
                if let Some(v) = version {
                    script.existing.remove(&v);
                }
                CommandOutput::ok("")
            }
            "train version" => CommandOutput::ok(r#"[{"status": "Queued"}]"#),
            "get status" => {
                let payload = script.statuses.pop_front().unwrap_or_else(|| script.last_status.clone());
                CommandOutput::ok(payload)
            }
            "publish version" => CommandOutput::ok(r#"{"endpointUrl": "https://westus.example/app-1"}"#),
            "list versions" => {
                let list: Vec<_> = script.versions.iter().map(|v| serde_json::json!({ "version": v })).collect();
                CommandOutput::ok(serde_json::to_string(&list).unwrap())
            }
            "export version" => CommandOutput::ok(script.export_payload.clone()),
            other => CommandOutput::failed(2, format!("unknown command {other}")),
        }
    }

    fn ludown(&self, call: &Call) -> CommandOutput {
        let output = self.script.lock().unwrap().converter_output.clone();
        let dir = PathBuf::from(call.flag("-o").unwrap_or("."));
        match call.args.first().map(String::as_str) {
            Some("parse") => {
                if let Some(out) = call.flag("--out") {
                    std::fs::write(dir.join(out), r#"{"intents": []}"#).unwrap();
                }
            }
            Some("refresh") => {
                let input_ok = call.flag("-i").is_some_and(|p| Path::new(p).is_file());
                if !input_ok {
                    return CommandOutput::failed(1, "input not found");
                }
                if let Some(name) = call.flag("-n") {
                    std::fs::write(dir.join(format!("{name}.lu")), "## intent Greeting\n- hi\n").unwrap();
                }
            }
            _ => return CommandOutput::failed(2, "unknown converter command"),
        }
        output
    }
}

#[async_trait]
impl CommandRunner for ScriptedRunner {
    async fn run(&self, program: &str, args: &[String]) -> SyncResult<CommandOutput> {
        let call = Call { program: program.to_string(), args: args.to_vec() };
        self.calls.lock().unwrap().push(call.clone());
        Ok(match program {
            "ludown" => self.ludown(&call),
            _ => self.luis(&call),
        })
    }
}

pub fn status_payload(codes: &[i64]) -> String {
    let parts: Vec<_> = codes
        .iter()
        .enumerate()
        .map(|(i, c)| serde_json::json!({ "modelId": format!("m{i}"), "details": { "statusId": c } }))
        .collect();
    serde_json::to_string(&parts).unwrap()
}

#[derive(Debug, Default)]
pub struct RecordingSink {
    events: Mutex<Vec<ProgressEvent>>,
}

impl RecordingSink {
    pub fn events(&self) -> Vec<ProgressEvent> {
        self.events.lock().unwrap().clone()
    }

    pub fn messages(&self) -> Vec<String> {
        self.events().iter().map(|e| e.message().to_string()).collect()
    }
}

impl ProgressSink for RecordingSink {
    fn on_event(&self, event: ProgressEvent) {
        self.events.lock().unwrap().push(event);
    }
}

pub fn app() -> AppConfig {
    AppConfig {
        app_id: "app-1".to_string(),
        authoring_key: "key-1".to_string(),
        endpoint_base_path: Some("https://westus.api.cognitive.microsoft.com/luis/api/v2.0".to_string()),
    }
}

pub fn app_without_endpoint() -> AppConfig {
    AppConfig { endpoint_base_path: None, ..app() }
}

pub fn write_model(dir: &Path, content: &str) -> PathBuf {
    let path = dir.join("app.lu");
    std::fs::write(&path, content).unwrap();
    path
}
