pub mod layout;

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

pub const DEFAULT_RECIPIENT: &str = "Luke Wroblewski";
pub const DEFAULT_TITLE: &str = "UX Design Foundations";
pub const DEFAULT_DESCRIPTION: &str = "For successfully completing the course and demonstrating a solid understanding of its core principles, methods and practices.";
pub const DEFAULT_ISSUE_DATE: &str = "March 15, 2024";
pub const DEFAULT_CERTIFICATE_ID: &str = "123235467";
pub const DEFAULT_SIGNATORY: &str = "Course Director";
pub const DEFAULT_ORGANIZATION: &str = "uxcel";

/// Certificate data as supplied by the portal. Every field is optional.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CertificateRecord {
    #[serde(default)]
    pub recipient_name: Option<String>,
    #[serde(default)]
    pub course_name: Option<String>,
    #[serde(default)]
    pub achievement: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub issue_date: Option<String>,
    #[serde(default)]
    pub certificate_id: Option<String>,
    #[serde(default)]
    pub signatory: Option<String>,
    #[serde(default)]
    pub organization: Option<String>,
}

/// A record with every field populated, ready for drawing.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ResolvedRecord {
    pub recipient_name: String,
    pub title: String,
    pub description: String,
    pub issue_date: String,
    pub certificate_id: String,
    pub signatory: String,
    pub organization: String,
}

fn non_blank(value: &Option<String>) -> Option<&str> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|v| !v.is_empty())
}

impl CertificateRecord {
    /// Substitutes the fixed defaults for absent or blank fields.
    /// `courseName` takes precedence over `achievement` for the title.
    pub fn resolve(&self) -> ResolvedRecord {
        let pick = |value: &Option<String>, default: &str| {
            non_blank(value).unwrap_or(default).to_string()
        };

        let title = non_blank(&self.course_name)
            .or_else(|| non_blank(&self.achievement))
            .unwrap_or(DEFAULT_TITLE)
            .to_string();

        ResolvedRecord {
            recipient_name: pick(&self.recipient_name, DEFAULT_RECIPIENT),
            title,
            description: pick(&self.description, DEFAULT_DESCRIPTION),
            issue_date: pick(&self.issue_date, DEFAULT_ISSUE_DATE),
            certificate_id: pick(&self.certificate_id, DEFAULT_CERTIFICATE_ID),
            signatory: pick(&self.signatory, DEFAULT_SIGNATORY),
            organization: pick(&self.organization, DEFAULT_ORGANIZATION),
        }
    }
}

/// The closed set of certificate layouts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TemplateKind {
    #[serde(rename = "ux_design_foundations")]
    UxDesignFoundations,
    #[serde(rename = "product_designer_1")]
    ProductDesigner1,
    #[serde(rename = "academic")]
    Academic,
    #[serde(rename = "modern")]
    Modern,
}

impl TemplateKind {
    pub const ALL: [TemplateKind; 4] = [
        TemplateKind::UxDesignFoundations,
        TemplateKind::ProductDesigner1,
        TemplateKind::Academic,
        TemplateKind::Modern,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            TemplateKind::UxDesignFoundations => "ux_design_foundations",
            TemplateKind::ProductDesigner1 => "product_designer_1",
            TemplateKind::Academic => "academic",
            TemplateKind::Modern => "modern",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            TemplateKind::UxDesignFoundations => "UX Design Foundations",
            TemplateKind::ProductDesigner1 => "Product Designer I",
            TemplateKind::Academic => "Academic",
            TemplateKind::Modern => "Modern",
        }
    }

    /// Procedural templates issue drawing calls directly; declarative ones
    /// describe a composition of positioned blocks.
    pub fn is_declarative(&self) -> bool {
        matches!(self, TemplateKind::Academic | TemplateKind::Modern)
    }
}

impl fmt::Display for TemplateKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownTemplate(pub String);

impl fmt::Display for UnknownTemplate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown certificate template: {}", self.0)
    }
}

impl std::error::Error for UnknownTemplate {}

impl FromStr for TemplateKind {
    type Err = UnknownTemplate;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        TemplateKind::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| UnknownTemplate(s.to_string()))
    }
}
