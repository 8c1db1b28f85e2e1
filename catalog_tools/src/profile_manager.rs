use std::{
    fs,
    io,
    io::{Error, ErrorKind},
    path::{Path, PathBuf},
};

use catalog_common::Secret;
use dirs::home_dir;
use log::info;
use serde::{Deserialize, Serialize};

/// Saved credentials, kept in `~/.catalog_tools/config.toml`.
#[derive(Serialize, Deserialize, Default, Debug, Clone)]
pub struct UserData {
    pub baserow: Option<BaserowProfile>,
    pub loja_integrada: Option<LojaProfile>,
}

#[derive(Serialize, Deserialize, Default, Debug, Clone)]
#[serde(default)]
pub struct BaserowProfile {
    pub url: String,
    pub token: Secret<String>,
}

#[derive(Serialize, Deserialize, Default, Debug, Clone)]
#[serde(default)]
pub struct LojaProfile {
    pub api_key: Secret<String>,
    pub app_id: String,
    /// Overrides the default API root
    pub api_url: Option<String>,
}

pub fn get_config_path() -> io::Result<PathBuf> {
    let home = home_dir().ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, "Home directory not found"))?;
    let config_dir = home.join(".catalog_tools");
    if !config_dir.exists() {
        fs::create_dir_all(&config_dir)?;
        set_permissions(&config_dir, 0o700)?;
    }
    let config_file = config_dir.join("config.toml");
    if !config_file.exists() {
        info!("Creating default config file");
        write_config_to(&config_file, &UserData::default())?;
    }
    Ok(config_file)
}

fn set_permissions(path: &Path, perms: u32) -> io::Result<()> {
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        let metadata = fs::metadata(path)?;
        let mut permissions = metadata.permissions();
        permissions.set_mode(perms);
        fs::set_permissions(path, permissions)?;
    }
    #[cfg(not(unix))]
    let _ = (path, perms);
    Ok(())
}

pub fn read_config_from(path: &Path) -> io::Result<UserData> {
    let config_str = fs::read_to_string(path)?;
    toml::from_str(&config_str).map_err(|e| Error::new(ErrorKind::InvalidData, e.to_string()))
}

/// The file holds credentials, so it is only readable by its owner.
pub fn write_config_to(path: &Path, config: &UserData) -> io::Result<()> {
    let config_str = toml::to_string(config).map_err(|e| Error::new(ErrorKind::InvalidData, e.to_string()))?;
    fs::write(path, config_str)?;
    set_permissions(path, 0o600)
}

pub fn read_config() -> io::Result<UserData> {
    read_config_from(&get_config_path()?)
}

pub fn write_config(config: &UserData) -> io::Result<()> {
    write_config_to(&get_config_path()?, config)
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn profile_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        let data = UserData {
            baserow: Some(BaserowProfile {
                url: "https://baserow.example.com".into(),
                token: Secret::new("tok".to_string()),
            }),
            loja_integrada: None,
        };
        write_config_to(&path, &data).unwrap();
        let text = fs::read_to_string(&path).unwrap();
        assert!(text.contains("[baserow]"));
        assert!(text.contains("token = \"tok\""));
        let read = read_config_from(&path).unwrap();
        let baserow = read.baserow.unwrap();
        assert_eq!(baserow.url, "https://baserow.example.com");
        assert_eq!(baserow.token.reveal(), "tok");
        assert!(read.loja_integrada.is_none());
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            assert_eq!(fs::metadata(&path).unwrap().permissions().mode() & 0o777, 0o600);
        }
    }

    #[test]
    fn empty_file_is_an_empty_profile() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "").unwrap();
        let read = read_config_from(&path).unwrap();
        assert!(read.baserow.is_none() && read.loja_integrada.is_none());

        fs::write(&path, "[loja_integrada]\napp_id = \"1234\"\n").unwrap();
        let loja = read_config_from(&path).unwrap().loja_integrada.unwrap();
        assert_eq!(loja.app_id, "1234");
        assert!(loja.api_key.is_empty());
        assert!(loja.api_url.is_none());
    }
}
