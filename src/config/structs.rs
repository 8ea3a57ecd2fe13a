use serde::{Deserialize, Serialize};

/// 默认配置文件路径
pub const DEFAULT_CONFIG_PATH: &str = "config.toml";

/// 环境变量前缀，例如 `COUPONHUB__SERVER__PORT=9000`
pub const ENV_PREFIX: &str = "COUPONHUB";

/// 静态配置（从 TOML 和环境变量加载，启动时使用）
///
/// 优先级：ENV > config.toml > 默认值
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct StaticConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub admin: AdminConfig,
    #[serde(default)]
    pub site: SiteConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl StaticConfig {
    /// 从默认路径和环境变量加载配置
    pub fn load() -> Self {
        Self::load_from(DEFAULT_CONFIG_PATH)
    }

    /// 从指定 TOML 文件和环境变量加载配置
    pub fn load_from(path: &str) -> Self {
        use config::{Config, Environment, File};

        let builder = Config::builder()
            // 1. 从 TOML 文件加载（可选）
            .add_source(File::with_name(path).required(false))
            // 2. 从环境变量覆盖
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .separator("__")
                    .try_parsing(true),
            );

        match builder.build() {
            Ok(settings) => match settings.try_deserialize::<StaticConfig>() {
                Ok(config) => {
                    if std::path::Path::new(path).exists() {
                        eprintln!("[INFO] Configuration loaded from: {}", path);
                    }
                    config
                }
                Err(e) => {
                    eprintln!("[ERROR] Failed to deserialize config: {}", e);
                    Self::default()
                }
            },
            Err(e) => {
                eprintln!("[ERROR] Failed to build config: {}", e);
                Self::default()
            }
        }
    }

    /// 生成示例 TOML 配置文件
    pub fn generate_sample_config() -> String {
        let sample_config = Self::default();
        toml::to_string_pretty(&sample_config)
            .unwrap_or_else(|e| format!("Error generating sample config: {}", e))
    }

    /// 保存配置到 TOML 文件
    pub fn save_to_file<P: AsRef<std::path::Path>>(&self, path: P) -> anyhow::Result<()> {
        let content = toml::to_string_pretty(self)?;

        if let Some(parent) = path.as_ref().parent()
            && !parent.as_os_str().is_empty()
            && !parent.exists()
        {
            std::fs::create_dir_all(parent)?;
        }

        std::fs::write(path, content)?;
        Ok(())
    }
}

/// 服务器配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_server_host")]
    pub host: String,
    #[serde(default = "default_server_port")]
    pub port: u16,
    #[serde(default = "default_cpu_count")]
    pub cpu_count: usize,
}

/// 存储后端选择
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum BackendKind {
    /// 配置了 database_url 时使用数据库，否则使用 JSON 文件
    #[default]
    Auto,
    File,
    Database,
}

/// 存储配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    #[serde(default)]
    pub backend: BackendKind,
    /// JSON 文件所在目录（file 后端）
    #[serde(default = "default_data_dir")]
    pub data_dir: String,
    /// 数据库连接 URL（database 后端），sqlite:// mysql:// postgres://
    #[serde(default)]
    pub database_url: String,
    #[serde(default = "default_database_pool_size")]
    pub pool_size: u32,
}

impl StorageConfig {
    /// 解析最终使用的后端，只在启动时调用一次
    pub fn resolved_backend(&self) -> BackendKind {
        match self.backend {
            BackendKind::Auto if self.database_url.trim().is_empty() => BackendKind::File,
            BackendKind::Auto => BackendKind::Database,
            other => other,
        }
    }
}

/// 管理后台配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdminConfig {
    /// 管理员密码，为空时管理后台关闭
    #[serde(default)]
    pub password: String,
    /// 会话 Cookie 的 HMAC 密钥，为空时每次启动随机生成
    #[serde(default)]
    pub session_secret: String,
    #[serde(default = "default_session_ttl_hours")]
    pub session_ttl_hours: u64,
    #[serde(default)]
    pub cookie_secure: bool,
    /// 登录限流：突发次数
    #[serde(default = "default_login_burst")]
    pub login_burst: u32,
    /// 登录限流：每次补充一个令牌的秒数
    #[serde(default = "default_login_period_secs")]
    pub login_period_secs: u64,
}

impl AdminConfig {
    pub fn is_enabled(&self) -> bool {
        !self.password.is_empty()
    }
}

/// 前台展示相关配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SiteConfig {
    /// store 页面 "其他商家" 的数量上限
    #[serde(default = "default_other_stores_limit")]
    pub other_stores_limit: usize,
    /// 点击跳转无法解析目标时的回退地址
    #[serde(default = "default_redirect")]
    pub default_redirect: String,
}

/// 日志配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default = "default_log_format")]
    pub format: String,
    #[serde(default)]
    pub file: Option<String>,
    #[serde(default = "default_max_backups")]
    pub max_backups: u32,
    #[serde(default = "default_enable_rotation")]
    pub enable_rotation: bool,
}

// ============================================================
// Default value functions
// ============================================================

fn default_server_host() -> String {
    "127.0.0.1".to_string()
}

fn default_server_port() -> u16 {
    3000
}

fn default_cpu_count() -> usize {
    num_cpus::get()
}

fn default_data_dir() -> String {
    "data".to_string()
}

fn default_database_pool_size() -> u32 {
    10
}

fn default_session_ttl_hours() -> u64 {
    24
}

fn default_login_burst() -> u32 {
    5
}

fn default_login_period_secs() -> u64 {
    12
}

fn default_other_stores_limit() -> usize {
    12
}

fn default_redirect() -> String {
    "/".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "text".to_string()
}

fn default_max_backups() -> u32 {
    5
}

fn default_enable_rotation() -> bool {
    true
}

// ============================================================
// Default implementations
// ============================================================

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_server_host(),
            port: default_server_port(),
            cpu_count: default_cpu_count(),
        }
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            backend: BackendKind::default(),
            data_dir: default_data_dir(),
            database_url: String::new(),
            pool_size: default_database_pool_size(),
        }
    }
}

impl Default for AdminConfig {
    fn default() -> Self {
        Self {
            password: String::new(),
            session_secret: String::new(),
            session_ttl_hours: default_session_ttl_hours(),
            cookie_secure: false,
            login_burst: default_login_burst(),
            login_period_secs: default_login_period_secs(),
        }
    }
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            other_stores_limit: default_other_stores_limit(),
            default_redirect: default_redirect(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
            file: None,
            max_backups: default_max_backups(),
            enable_rotation: default_enable_rotation(),
        }
    }
}
