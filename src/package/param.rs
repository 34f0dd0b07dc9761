//! `sce_sys/param.sfo` metadata written into the staging layout

use crate::package::error::{PackageError, Result};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParamSfo {
    pub attribute: u32,
    pub content_id: String,
    pub short_title: String,
    pub title: String,
    pub pubtool_info: String,
    pub app_ver: String,
    pub category: String,
}

impl Default for ParamSfo {
    fn default() -> Self {
        Self {
            attribute: 512,
            content_id: "MyApp0001".to_string(),
            short_title: "My App".to_string(),
            title: "My App".to_string(),
            pubtool_info: "0x00000001".to_string(),
            app_ver: "01.00".to_string(),
            category: "GN".to_string(),
        }
    }
}

impl ParamSfo {
    /// Set both the short and the full title
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        let title = title.into();
        self.short_title = title.clone();
        self.title = title;
        self
    }

    pub fn with_content_id(mut self, content_id: impl Into<String>) -> Self {
        self.content_id = content_id.into();
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.content_id.len() != 9 || !self.content_id.chars().all(|c| c.is_ascii_alphanumeric())
        {
            return Err(invalid(
                "CONTENT_ID",
                format!("expected 9 ASCII letters or digits, got {:?}", self.content_id),
            ));
        }

        let app_ver_ok = self
            .app_ver
            .split_once('.')
            .map(|(major, minor)| {
                major.len() == 2
                    && minor.len() == 2
                    && major.chars().chain(minor.chars()).all(|c| c.is_ascii_digit())
            })
            .unwrap_or(false);
        if !app_ver_ok {
            return Err(invalid(
                "APP_VER",
                format!("expected NN.NN, got {:?}", self.app_ver),
            ));
        }

        if self.title.trim().is_empty() {
            return Err(invalid("TITLE", "must not be empty".to_string()));
        }
        if self.short_title.trim().is_empty() {
            return Err(invalid("STITLE", "must not be empty".to_string()));
        }

        Ok(())
    }

    /// `KEY=VALUE` text consumed by the packaging tool
    pub fn render(&self) -> String {
        format!(
            "ATTRIBUTE={}\nCONTENT_ID={}\nSTITLE={}\nTITLE={}\nPUBTOOLINFO={}\nAPP_VER={}\nCATEGORY={}\n",
            self.attribute,
            self.content_id,
            self.short_title,
            self.title,
            self.pubtool_info,
            self.app_ver,
            self.category,
        )
    }
}

fn invalid(field: &str, reason: String) -> PackageError {
    PackageError::InvalidMetadata {
        field: field.to_string(),
        reason,
    }
}
