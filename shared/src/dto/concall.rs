//! Concall listing DTOs.

use serde::{Deserialize, Deserializer, Serialize};

/// Guidance value the backend stores when a call gave no forward guidance
pub const NO_GUIDANCE_SENTINEL: &str = "NA";

/// A processed earnings-call summary
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ConcallSummary {
    pub name: String,
    pub date: String,
    pub guidance: String,
}

/// Interpretation of [`ConcallSummary::guidance`].
///
/// `"NA"` and `""` are different things: the first is an explicit "no guidance"
/// marker, the second is guidance text that happens to be empty.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Guidance<'a> {
    NotProvided,
    Provided(&'a str),
}

impl ConcallSummary {
    pub fn guidance(&self) -> Guidance<'_> {
        if self.guidance == NO_GUIDANCE_SENTINEL {
            Guidance::NotProvided
        } else {
            Guidance::Provided(&self.guidance)
        }
    }

    pub fn has_guidance(&self) -> bool {
        matches!(self.guidance(), Guidance::Provided(_))
    }
}

/// Pagination metadata attached to list and search responses
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct PageMeta {
    #[serde(default)]
    pub page: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
    #[serde(default)]
    pub total: u64,
    #[serde(rename = "totalPages", default)]
    pub total_pages: u32,
}

/// Envelope returned by `/list_concalls` and `/find_concalls`
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ConcallPage {
    #[serde(default, deserialize_with = "null_as_empty")]
    pub data: Vec<ConcallSummary>,
    #[serde(default)]
    pub meta: PageMeta,
}

// The backend serializes an empty result set as `"data": null`
fn null_as_empty<'de, D>(deserializer: D) -> Result<Vec<ConcallSummary>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Vec<ConcallSummary>>::deserialize(deserializer)?.unwrap_or_default())
}
