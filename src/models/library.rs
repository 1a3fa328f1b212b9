//! Library (branch) model

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Library {
    pub library_id: i64,
    pub library_name: String,
    #[serde(default)]
    pub lb_address: Option<String>,
    #[serde(default)]
    pub lb_phone: Option<String>,
    #[serde(default)]
    pub lb_operating_hour: Option<String>,
    #[serde(default)]
    pub total_books: Option<i64>,
    #[serde(default)]
    pub available_books: Option<i64>,
}

/// Create/update library request
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LibraryForm {
    pub library_name: String,
    pub lb_address: String,
    pub lb_phone: String,
    pub lb_operating_hour: String,
}

impl From<&Library> for LibraryForm {
    fn from(library: &Library) -> Self {
        Self {
            library_name: library.library_name.clone(),
            lb_address: library.lb_address.clone().unwrap_or_default(),
            lb_phone: library.lb_phone.clone().unwrap_or_default(),
            lb_operating_hour: library.lb_operating_hour.clone().unwrap_or_default(),
        }
    }
}

/// Per-library counters from `/libraries/{id}/stats`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LibraryStats {
    pub total_books: Option<i64>,
    pub available_books: Option<i64>,
    pub borrowed_books: Option<i64>,
    pub total_copies: Option<i64>,
    pub available_copies: Option<i64>,
}
