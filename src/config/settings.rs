#[derive(Debug, Clone)]
pub struct StorageSettings {
    pub database_path: String,
}

impl Default for StorageSettings {
    fn default() -> Self {
        Self {
            database_path: std::env::var("DATABASE_PATH")
                .unwrap_or_else(|_| "pilot_ledger.db".to_string()),
        }
    }
}

#[derive(Debug, Clone)]
pub struct AccountSettings {
    pub min_password_length: usize,
}

impl Default for AccountSettings {
    fn default() -> Self {
        Self {
            min_password_length: 6,
        }
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub storage: StorageSettings,
    pub accounts: AccountSettings,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl AppConfig {
    pub fn new() -> Self {
        Self {
            storage: StorageSettings::default(),
            accounts: AccountSettings::default(),
        }
    }
}
