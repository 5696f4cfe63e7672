use regex::{Captures, Regex};
use serde::Deserialize;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;
use std::time::Duration;
use tracing::debug;

use crate::http::normalize_base_url;
use crate::{ProbeError, Result};

/// 默认目标：本地启动的后端
pub const DEFAULT_BASE_URL: &str = "http://localhost:8001/api";
/// 每个请求的默认超时（秒）
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// 单个环境的配置，所有字段都可缺省
#[derive(Debug, Clone, Deserialize, Default, PartialEq)]
pub struct Environment {
    pub base_url: Option<String>,
    pub admin_email: Option<String>,
    pub admin_password: Option<String>,
    pub timeout_secs: Option<u64>,
}

/// 完整的配置文件
#[derive(Debug, Clone, Deserialize, Default)]
pub struct ProbeConfig {
    /// 未指定 `--env` 时使用的环境
    #[serde(default)]
    pub default_env: Option<String>,

    /// 所有环境配置
    #[serde(default)]
    pub environments: HashMap<String, Environment>,
}

impl ProbeConfig {
    /// 获取指定环境
    pub fn get_environment(&self, env_name: &str) -> Option<&Environment> {
        self.environments.get(env_name)
    }
}

/// CLI 传入的覆盖项（优先级最高）
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub base_url: Option<String>,
    pub admin_email: Option<String>,
    pub admin_password: Option<String>,
    pub timeout_secs: Option<u64>,
}

/// 合并之后、真正用于运行的设置
#[derive(Debug, Clone)]
pub struct Settings {
    pub base_url: url::Url,
    pub admin_email: String,
    pub admin_password: String,
    pub timeout: Duration,
}

impl Settings {
    /// 按 默认值 -> 配置文件环境 -> CLI 的顺序合并
    pub fn resolve(
        config: Option<&ProbeConfig>,
        env_name: Option<&str>,
        overrides: &Overrides,
    ) -> Result<Self> {
        let env = match config {
            Some(config) => {
                let name = env_name.or(config.default_env.as_deref());
                match name {
                    Some(name) => Some(config.get_environment(name).cloned().ok_or_else(|| {
                        ProbeError::ConfigError(format!("environment '{}' not found", name))
                    })?),
                    None => None,
                }
            }
            None => match env_name {
                Some(name) => {
                    return Err(ProbeError::ConfigError(format!(
                        "environment '{}' requested but no config file was found",
                        name
                    )));
                }
                None => None,
            },
        }
        .unwrap_or_default();

        let pick = |cli: &Option<String>, file: &Option<String>| {
            cli.clone()
                .or_else(|| file.as_deref().map(resolve_env_vars))
        };

        let base_url = pick(&overrides.base_url, &env.base_url)
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
        let admin_email = pick(&overrides.admin_email, &env.admin_email)
            .filter(|s| !s.is_empty())
            .ok_or(ProbeError::MissingSetting("admin_email"))?;
        let admin_password = pick(&overrides.admin_password, &env.admin_password)
            .filter(|s| !s.is_empty())
            .ok_or(ProbeError::MissingSetting("admin_password"))?;
        let timeout_secs = overrides
            .timeout_secs
            .or(env.timeout_secs)
            .unwrap_or(DEFAULT_TIMEOUT_SECS);
        if timeout_secs == 0 {
            return Err(ProbeError::ConfigError(
                "timeout must be at least 1 second".to_string(),
            ));
        }

        Ok(Self {
            base_url: normalize_base_url(&base_url)?,
            admin_email,
            admin_password,
            timeout: Duration::from_secs(timeout_secs),
        })
    }
}

/// 解析并替换系统环境变量 ${VAR}，找不到的保持原样
pub fn resolve_env_vars(text: &str) -> String {
    static ENV_REGEX: OnceLock<Regex> = OnceLock::new();
    let re = ENV_REGEX.get_or_init(|| {
        Regex::new(r"\$\{([A-Z_][A-Z0-9_]*)\}").expect("env var pattern is valid")
    });

    re.replace_all(text, |caps: &Captures| {
        std::env::var(&caps[1]).unwrap_or_else(|_| caps[0].to_string())
    })
    .to_string()
}

/// 配置文件加载器
pub struct ConfigLoader;

impl ConfigLoader {
    /// 配置文件名
    pub const CONFIG_FILE: &'static str = "portfolio-probe.toml";

    /// 从指定路径加载配置文件
    pub fn load_from_path<P: AsRef<Path>>(path: P) -> Result<ProbeConfig> {
        let content = fs::read_to_string(path.as_ref()).map_err(|e| {
            ProbeError::ConfigError(format!("{}: {}", path.as_ref().display(), e))
        })?;
        Ok(toml::from_str(&content)?)
    }

    /// 查找配置文件
    /// 查找顺序：
    /// 1. 当前目录及其父目录
    /// 2. 用户配置目录 ~/.config/portfolio-probe/
    pub fn find_config_file() -> Option<PathBuf> {
        Self::find_in_ancestors().or_else(Self::find_in_user_dir)
    }

    /// 找到就加载，找不到返回 None；文件存在但解析失败会报错
    pub fn find_and_load() -> Result<Option<ProbeConfig>> {
        match Self::find_config_file() {
            Some(path) => {
                debug!("Loading config from {}", path.display());
                Self::load_from_path(&path).map(Some)
            }
            None => Ok(None),
        }
    }

    fn find_in_ancestors() -> Option<PathBuf> {
        let current = std::env::current_dir().ok()?;
        current
            .ancestors()
            .map(|dir| dir.join(Self::CONFIG_FILE))
            .find(|path| path.exists())
    }

    fn find_in_user_dir() -> Option<PathBuf> {
        let home = dirs::home_dir()?;
        let path = home
            .join(".config")
            .join("portfolio-probe")
            .join(Self::CONFIG_FILE);
        path.exists().then_some(path)
    }
}
