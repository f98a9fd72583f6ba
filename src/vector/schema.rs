use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Business vertical a record belongs to. Closed set, used as a hard
/// retrieval filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Module {
    Obras,
    Bienes,
    Servicios,
    Consultoria,
}

impl Module {
    pub fn as_str(&self) -> &'static str {
        match self {
            Module::Obras => "obras",
            Module::Bienes => "bienes",
            Module::Servicios => "servicios",
            Module::Consultoria => "consultoria",
        }
    }
}

impl fmt::Display for Module {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Module {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "obras" => Ok(Module::Obras),
            "bienes" => Ok(Module::Bienes),
            "servicios" => Ok(Module::Servicios),
            "consultoria" | "consultoría" => Ok(Module::Consultoria),
            other => Err(format!("Unknown module: {}", other)),
        }
    }
}

/// A rated proposal fragment with its embedding. Created once on feedback
/// submission, immutable thereafter.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProposalRecord {
    pub id: Uuid,
    pub content: String,
    pub embedding: Vec<f32>,
    pub module: Module,
    pub kind: String,
    pub successful: bool,
    pub rating: u8,
    pub licitation_type: Option<String>,
    pub entity: Option<String>,
    pub reference_amount: Option<f64>,
    pub project_id: Option<String>,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl ProposalRecord {
    pub fn new(content: String, embedding: Vec<f32>, metadata: ProposalMetadata) -> Self {
        Self {
            id: Uuid::new_v4(),
            content,
            embedding,
            module: metadata.module,
            kind: metadata.kind,
            successful: metadata.successful,
            rating: metadata.rating,
            licitation_type: metadata.licitation_type,
            entity: metadata.entity,
            reference_amount: metadata.reference_amount,
            project_id: metadata.project_id,
            notes: metadata.notes,
            created_at: Utc::now(),
        }
    }
}

/// Contextual fields attached to a proposal on insert.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProposalMetadata {
    pub module: Module,
    pub kind: String,
    pub successful: bool,
    pub rating: u8,
    pub licitation_type: Option<String>,
    pub entity: Option<String>,
    pub reference_amount: Option<f64>,
    pub project_id: Option<String>,
    pub notes: Option<String>,
}

/// A named success indicator mined from winning, highly rated text.
/// Duplicates across feedback events accumulate as reinforcement signal.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PatternRecord {
    pub id: Uuid,
    pub pattern_type: String,
    pub description: String,
    pub embedding: Vec<f32>,
    pub module: Module,
    pub created_at: DateTime<Utc>,
}

impl PatternRecord {
    pub fn new(
        pattern_type: String,
        description: String,
        embedding: Vec<f32>,
        module: Module,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            pattern_type,
            description,
            embedding,
            module,
            created_at: Utc::now(),
        }
    }
}

/// Equality filters applied before similarity scoring.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SearchFilters {
    pub module: Option<Module>,
    pub only_successful: bool,
    pub licitation_type: Option<String>,
}

impl SearchFilters {
    pub fn new() -> Self {
        Default::default()
    }

    pub fn module(mut self, module: Module) -> Self {
        self.module = Some(module);
        self
    }

    pub fn only_successful(mut self) -> Self {
        self.only_successful = true;
        self
    }

    pub fn licitation_type(mut self, licitation_type: String) -> Self {
        self.licitation_type = Some(licitation_type);
        self
    }

    pub fn matches(&self, record: &ProposalRecord) -> bool {
        if let Some(module) = self.module {
            if record.module != module {
                return false;
            }
        }
        if self.only_successful && !record.successful {
            return false;
        }
        if let Some(licitation_type) = &self.licitation_type {
            if record.licitation_type.as_deref() != Some(licitation_type.as_str()) {
                return false;
            }
        }
        true
    }
}

/// A scored record, produced only at query time.
#[derive(Debug, Clone, Serialize)]
pub struct SearchResult<T> {
    pub score: f32,
    pub record: T,
}

/// Aggregate counts over the store, optionally restricted to one module.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RagStats {
    pub total_proposals: usize,
    pub successful_proposals: usize,
    pub success_rate: f64,
    pub total_patterns: usize,
}
