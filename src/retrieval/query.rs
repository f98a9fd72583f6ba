//! Description of a new generation request, flattened into the text that
//! gets embedded for the similarity searches.

use crate::vector::Module;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RetrievalQuery {
    pub module: Option<Module>,
    pub profiles: Vec<String>,
    pub experience: Option<String>,
    pub certifications: Vec<String>,
    pub licitation_type: Option<String>,
}

impl RetrievalQuery {
    pub fn new() -> Self {
        Default::default()
    }

    pub fn module(mut self, module: Module) -> Self {
        self.module = Some(module);
        self
    }

    pub fn profiles(mut self, profiles: Vec<String>) -> Self {
        self.profiles = profiles;
        self
    }

    pub fn experience(mut self, experience: impl Into<String>) -> Self {
        self.experience = Some(experience.into());
        self
    }

    pub fn certifications(mut self, certifications: Vec<String>) -> Self {
        self.certifications = certifications;
        self
    }

    pub fn licitation_type(mut self, licitation_type: impl Into<String>) -> Self {
        self.licitation_type = Some(licitation_type.into());
        self
    }

    /// One labeled line per present field; absent fields produce nothing.
    /// The module is a hard store filter, not part of the embedded text.
    pub fn query_text(&self) -> String {
        let mut lines = Vec::new();
        if let Some(licitation_type) = &self.licitation_type {
            lines.push(format!("Tipo de licitación: {}", licitation_type));
        }
        if !self.profiles.is_empty() {
            lines.push(format!("Perfiles requeridos: {}", self.profiles.join(", ")));
        }
        if let Some(experience) = &self.experience {
            lines.push(format!("Experiencia requerida: {}", experience));
        }
        if !self.certifications.is_empty() {
            lines.push(format!(
                "Certificaciones: {}",
                self.certifications.join(", ")
            ));
        }
        lines.join("\n")
    }
}
