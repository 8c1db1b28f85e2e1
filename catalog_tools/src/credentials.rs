//! Works out which credentials to use. A command-line value wins over the environment (including `.env`), which wins
//! over the saved profile. Whatever is still missing is asked for on the terminal.

use anyhow::{bail, Result};
use baserow_tools::BaserowConfig;
use catalog_common::Secret;
use dialoguer::{Input, Password};
use log::warn;
use loja_tools::LojaIntegradaConfig;

use crate::profile_manager::{read_config, write_config, BaserowProfile, LojaProfile, UserData};

/// The first candidate that holds something other than whitespace.
pub fn first_non_empty<I>(candidates: I) -> Option<String>
where I: IntoIterator<Item = Option<String>> {
    candidates.into_iter().flatten().map(|s| s.trim().to_string()).find(|s| !s.is_empty())
}

fn saved_profiles() -> UserData {
    read_config().unwrap_or_else(|e| {
        warn!("Could not read saved profiles. {e}");
        UserData::default()
    })
}

fn prompt_text(prompt: &str) -> Result<String> {
    Ok(Input::<String>::new().with_prompt(prompt).allow_empty(true).interact_text()?)
}

fn prompt_secret(prompt: &str) -> Result<String> {
    Ok(Password::new().with_prompt(prompt).allow_empty_password(true).interact()?)
}

pub fn baserow_config(url: Option<String>, token: Option<String>) -> Result<BaserowConfig> {
    let env = BaserowConfig::new_from_env_or_default();
    let profile = saved_profiles().baserow.unwrap_or_default();
    let url = match first_non_empty([url, Some(env.base_url), Some(profile.url)]) {
        Some(url) => url,
        None => prompt_text("Baserow URL (e.g. https://baserow.io or https://your-domain.com)")?,
    };
    let token = match first_non_empty([token, Some(env.token.reveal().clone()), Some(profile.token.reveal().clone())])
    {
        Some(token) => token,
        None => prompt_secret("Baserow API token")?,
    };
    let config = BaserowConfig::new(&url, &token);
    if !config.is_complete() {
        bail!("The Baserow URL and token are both required");
    }
    Ok(config)
}

pub fn loja_config(api_key: Option<String>, app_id: Option<String>) -> Result<LojaIntegradaConfig> {
    let mut config = LojaIntegradaConfig::new_from_env_or_default();
    let profile = saved_profiles().loja_integrada.unwrap_or_default();
    let api_key =
        match first_non_empty([api_key, Some(config.api_key.reveal().clone()), Some(profile.api_key.reveal().clone())])
        {
            Some(key) => key,
            None => prompt_secret("Loja Integrada API key (chave_api)")?,
        };
    let app_id = match first_non_empty([app_id, Some(config.app_id.clone()), Some(profile.app_id)]) {
        Some(id) => id,
        None => prompt_text("Loja Integrada application id (aplicacao)")?,
    };
    if std::env::var("LI_API_URL").is_err() {
        if let Some(api_url) = first_non_empty([profile.api_url]) {
            config.base_url = api_url;
        }
    }
    config.api_key = Secret::new(api_key.trim().to_string());
    config.app_id = app_id.trim().to_string();
    if !config.is_complete() {
        bail!("The Loja Integrada API key and application id are both required");
    }
    Ok(config)
}

pub fn save_baserow_profile(config: &BaserowConfig) -> Result<()> {
    let mut data = saved_profiles();
    data.baserow = Some(BaserowProfile { url: config.base_url.clone(), token: config.token.clone() });
    write_config(&data)?;
    println!("Baserow credentials saved");
    Ok(())
}

pub fn save_loja_profile(config: &LojaIntegradaConfig) -> Result<()> {
    let mut data = saved_profiles();
    let api_url = (config.base_url != loja_tools::DEFAULT_API_URL).then(|| config.base_url.clone());
    data.loja_integrada = Some(LojaProfile { api_key: config.api_key.clone(), app_id: config.app_id.clone(), api_url });
    write_config(&data)?;
    println!("Loja Integrada credentials saved");
    Ok(())
}
