//! Driver construction tests.

use explainer::{
    ExplainerConfig, ExplainerDriver, ExplainerErrorKind, ModelSettings, ModelsErrorKind,
    build_driver,
};
use std::time::Duration;

fn settings(toml_text: &str) -> anyhow::Result<ModelSettings> {
    Ok(toml::from_str(toml_text)?)
}

#[test]
fn test_missing_key_is_reported_by_variable_name() -> anyhow::Result<()> {
    let settings = settings(
        r#"
provider = "openai"
model = "gpt-4o-mini"
base_url = "http://127.0.0.1:9/v1/chat/completions"
api_key_env = "EXPLAINER_TEST_KEY_THAT_IS_NEVER_SET"
"#,
    )?;

    let err = match build_driver(&settings, None) {
        Ok(_) => panic!("expected a missing key error"),
        Err(e) => e,
    };

    match err.kind() {
        ExplainerErrorKind::Models(e) => {
            assert_eq!(
                e.kind,
                ModelsErrorKind::MissingApiKey("EXPLAINER_TEST_KEY_THAT_IS_NEVER_SET".to_string())
            );
            assert_eq!(e.provider, "openai");
        }
        other => panic!("expected a models error, got {:?}", other),
    }
    Ok(())
}

#[test]
fn test_custom_endpoint_uses_generic_client() -> anyhow::Result<()> {
    let settings = settings(
        r#"
provider = "ollama"
model = "qwen2.5-coder"
base_url = "http://127.0.0.1:11434/v1/chat/completions"
api_key_env = "EXPLAINER_TEST_OLLAMA_KEY"
"#,
    )?;
    // SAFETY: no other test reads or writes this variable.
    unsafe { std::env::set_var("EXPLAINER_TEST_OLLAMA_KEY", "local") };

    let driver = build_driver(&settings, Some(Duration::from_secs(5)))?;

    assert_eq!(driver.provider_name(), "ollama");
    assert_eq!(driver.model_name(), "qwen2.5-coder");
    Ok(())
}

#[test]
fn test_unknown_provider_gets_generic_label() -> anyhow::Result<()> {
    let settings = settings(
        r#"
provider = "my-gateway"
model = "m"
base_url = "http://127.0.0.1:9/chat"
api_key_env = "EXPLAINER_TEST_GATEWAY_KEY"
"#,
    )?;
    // SAFETY: no other test reads or writes this variable.
    unsafe { std::env::set_var("EXPLAINER_TEST_GATEWAY_KEY", "token") };

    let driver = build_driver(&settings, None)?;
    assert_eq!(driver.provider_name(), "openai-compatible");
    Ok(())
}

#[cfg(feature = "groq")]
#[test]
#[cfg_attr(not(feature = "api"), ignore)]
fn test_bundled_settings_build_groq_driver() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = ExplainerConfig::bundled()?;

    let driver = build_driver(config.model(), config.llm_timeout())?;

    assert_eq!(driver.provider_name(), "groq");
    assert_eq!(driver.model_name(), config.model().model());
    Ok(())
}
