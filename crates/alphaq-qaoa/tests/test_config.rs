//! Config file loading and runner construction.

use std::fs;

use alphaq_qaoa::{OptimizerKind, QaoaConfig, QaoaError, QaoaRunner};
use tempfile::TempDir;

const YAML: &str = r#"
n_qubits: 4
layers: 2
seed: 7
optimizer:
  kind: adam
  stepsize: 0.1
  steps: 5
hamiltonian:
  - { coeff: 1.0, pauli: "Z0 Z1" }
  - { coeff: 1.0, pauli: "Z1 Z2" }
  - { coeff: 1.0, pauli: "Z2 Z3" }
"#;

const JSON: &str = r#"{
  "n_qubits": 3,
  "optimizer": { "kind": "gradient_descent", "stepsize": 0.2, "steps": 3 },
  "hamiltonian": [
    { "coeff": 0.5, "pauli": "Y0" },
    { "coeff": 1.0, "pauli": "Z0 Z2" }
  ]
}"#;

fn write(dir: &TempDir, name: &str, text: &str) -> std::path::PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, text).unwrap();
    path
}

#[test]
fn load_yaml_and_run() {
    let dir = TempDir::new().unwrap();
    let path = write(&dir, "chain.yaml", YAML);

    let config = QaoaConfig::load(&path).unwrap();
    assert_eq!(config.n_qubits, 4);
    assert_eq!(config.optimizer.kind, OptimizerKind::Adam);

    let runner = QaoaRunner::from_config(&config).unwrap();
    assert_eq!(runner.seed, 7);
    assert_eq!(runner.steps, 5);
    assert_eq!(runner.num_parameters(), 4);

    let outcome = runner.run().unwrap();
    assert_eq!(outcome.history.len(), 6);
    assert!(outcome.params.iter().all(|p| p.is_finite()));
}

#[test]
fn load_json_by_extension() {
    let dir = TempDir::new().unwrap();
    let path = write(&dir, "problem.JSON", JSON);

    let config = QaoaConfig::load(&path).unwrap();
    assert_eq!(config.layers, 1);
    assert_eq!(config.seed, 42);
    assert_eq!(config.optimizer.kind, OptimizerKind::GradientDescent);

    let runner = QaoaRunner::from_config(&config).unwrap();
    assert_eq!(runner.optimizer.name(), "gradient_descent");
}

#[test]
fn unknown_extension_rejected() {
    let dir = TempDir::new().unwrap();
    let path = write(&dir, "problem.toml", YAML);
    assert!(matches!(
        QaoaConfig::load(&path),
        Err(QaoaError::UnknownConfigFormat(_))
    ));
}

#[test]
fn missing_file_is_io_error() {
    let dir = TempDir::new().unwrap();
    let err = QaoaConfig::load(dir.path().join("absent.yml")).unwrap_err();
    assert!(matches!(err, QaoaError::Io { .. }));
    assert!(err.to_string().contains("absent.yml"));
}

#[test]
fn invalid_optimizer_settings_rejected_by_runner() {
    let text = YAML.replace("steps: 5", "steps: 0");
    let config = QaoaConfig::from_yaml_str(&text).unwrap();
    assert!(matches!(
        QaoaRunner::from_config(&config),
        Err(QaoaError::InvalidSteps(0))
    ));

    let text = YAML.replace("stepsize: 0.1", "stepsize: -0.1");
    let config = QaoaConfig::from_yaml_str(&text).unwrap();
    let err = QaoaRunner::from_config(&config).unwrap_err();
    assert!(err.is_configuration());
}

#[test]
fn unknown_optimizer_kind_is_parse_error() {
    let text = YAML.replace("kind: adam", "kind: lbfgs");
    assert!(matches!(
        QaoaConfig::from_yaml_str(&text),
        Err(QaoaError::Yaml(_))
    ));
}
