/// Loads service configuration from environment variables.
///
/// Implementors derive `serde::Deserialize`; field `database_url` is read from
/// `DATABASE_URL`, and so on. Optional settings should carry `#[serde(default)]`.
pub trait Config: Sized + serde::de::DeserializeOwned {
    fn try_from_env() -> Result<Self, envy::Error> {
        envy::from_env()
    }

    /// # Panics
    ///
    /// Panics if any required env var is missing or cannot be deserialized.
    fn from_env() -> Self {
        Self::try_from_env().expect("failed to load config from environment")
    }
}
