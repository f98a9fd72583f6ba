//! Lexical success-pattern detection: a fixed, closed table of named regex
//! indicators scanned over winning proposal text. Pure, no external calls.

use regex::Regex;
use serde::Serialize;

/// One firing of an indicator against a piece of text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PatternMatch {
    pub pattern_type: &'static str,
    pub description: &'static str,
}

struct Indicator {
    pattern_type: &'static str,
    description: &'static str,
    regex: Regex,
}

/// (type, human description, regex) — the closed indicator set. Phrases are
/// matched case-insensitively against the raw proposal text.
const INDICATORS: [(&str, &str, &str); 8] = [
    (
        "experiencia_especifica",
        "Menciona experiencia específica en el objeto a contratar",
        r"(?i)experiencia\s+espec[ií]fica",
    ),
    (
        "certificacion_vigente",
        "Acredita certificaciones vigentes",
        r"(?i)certificaci[oó]n(?:es)?\s+vigentes?",
    ),
    (
        "experiencia_años",
        "Cuantifica los años de experiencia acreditados",
        r"(?i)\d+\s*años\b",
    ),
    (
        "titulo_profesional",
        "Acredita título profesional del personal propuesto",
        r"(?i)t[ií]tulo\s+profesional|profesional(?:es)?\s+titulad",
    ),
    (
        "licencia_activa",
        "Acredita licencia o matrícula profesional activa",
        r"(?i)(?:licencia|matr[ií]cula)\s+(?:activa|vigente|profesional)",
    ),
    (
        "capacitacion",
        "Relaciona capacitaciones del equipo de trabajo",
        r"(?i)capacitaci[oó]n(?:es)?",
    ),
    (
        "especializacion",
        "Acredita estudios de especialización",
        r"(?i)especializaci[oó]n|especialista\s+en",
    ),
    (
        "documentos_soporte",
        "Adjunta contratos, actas u órdenes como documentos de soporte",
        r"(?i)contratos?\s+(?:suscrit|ejecutad|de\s+obra|similar)|actas?\s+de\s+(?:liquidaci[oó]n|recibo|entrega)|[oó]rden(?:es)?\s+de\s+(?:compra|servicio)",
    ),
];

pub struct PatternDetector {
    indicators: Vec<Indicator>,
}

impl PatternDetector {
    pub fn new() -> Self {
        let indicators = INDICATORS
            .iter()
            .map(|&(pattern_type, description, pattern)| Indicator {
                pattern_type,
                description,
                regex: Regex::new(pattern).expect("indicator regex must compile"),
            })
            .collect();
        Self { indicators }
    }

    /// Every indicator that fires at least once against `content`, in table
    /// order. One entry per indicator regardless of how often it matches.
    pub fn detect(&self, content: &str) -> Vec<PatternMatch> {
        self.indicators
            .iter()
            .filter(|indicator| indicator.regex.is_match(content))
            .map(|indicator| PatternMatch {
                pattern_type: indicator.pattern_type,
                description: indicator.description,
            })
            .collect()
    }
}

impl Default for PatternDetector {
    fn default() -> Self {
        Self::new()
    }
}
