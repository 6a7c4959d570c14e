//! Display colors assigned to accounts.
//!
//! Every account gets a random bright color at registration, used by
//! clients for avatars and comment bylines.

use serde::{Deserialize, Serialize};

/// Curated palette of bright, readable colors.
const BRIGHT_PALETTE: &[&str] = &[
    "#FF5733", "#33FF57", "#3357FF", "#FF33A1", "#F1C40F", "#8E44AD", "#3498DB", "#2ECC71",
    "#E74C3C", "#27AE60", "#9B59B6", "#1ABC9C", "#D35400", "#F39C12", "#16A085", "#E67E22",
    "#2980B9",
];

/// A `#rrggbb` hex display color.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DisplayColor(String);

impl DisplayColor {
    /// Pick a random color from the bright palette.
    #[must_use]
    pub fn random() -> Self {
        use rand::Rng;

        let mut rng = rand::rng();
        let idx = rng.random_range(0..BRIGHT_PALETTE.len());
        Self(BRIGHT_PALETTE[idx].to_owned())
    }

    /// Wrap a color string read back from storage.
    #[must_use]
    pub fn from_hex(hex: String) -> Self {
        Self(hex)
    }

    /// The `#rrggbb` string.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for DisplayColor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

// SQLx support (with postgres feature)
#[cfg(feature = "postgres")]
impl sqlx::Type<sqlx::Postgres> for DisplayColor {
    fn type_info() -> sqlx::postgres::PgTypeInfo {
        <String as sqlx::Type<sqlx::Postgres>>::type_info()
    }

    fn compatible(ty: &sqlx::postgres::PgTypeInfo) -> bool {
        <String as sqlx::Type<sqlx::Postgres>>::compatible(ty)
    }
}

#[cfg(feature = "postgres")]
impl<'r> sqlx::Decode<'r, sqlx::Postgres> for DisplayColor {
    fn decode(value: sqlx::postgres::PgValueRef<'r>) -> Result<Self, sqlx::error::BoxDynError> {
        let s = <String as sqlx::Decode<sqlx::Postgres>>::decode(value)?;
        Ok(Self(s))
    }
}

#[cfg(feature = "postgres")]
impl sqlx::Encode<'_, sqlx::Postgres> for DisplayColor {
    fn encode_by_ref(
        &self,
        buf: &mut sqlx::postgres::PgArgumentBuffer,
    ) -> Result<sqlx::encode::IsNull, sqlx::error::BoxDynError> {
        <String as sqlx::Encode<sqlx::Postgres>>::encode_by_ref(&self.0, buf)
    }
}
