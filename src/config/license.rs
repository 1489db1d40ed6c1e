//! License definitions.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Licenses a channel file can be published under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum License {
    /// Creative Commons Attribution (default).
    #[default]
    CcBy,
    CcBySa,
    CcByNd,
    CcByNc,
    CcByNcSa,
    CcByNcNd,
    AllRightsReserved,
    PublicDomain,
}

impl License {
    /// Identifier written to the `License ID` column of the content sheet.
    pub fn id(&self) -> &'static str {
        match self {
            License::CcBy => "CC BY",
            License::CcBySa => "CC BY-SA",
            License::CcByNd => "CC BY-ND",
            License::CcByNc => "CC BY-NC",
            License::CcByNcSa => "CC BY-NC-SA",
            License::CcByNcNd => "CC BY-NC-ND",
            License::AllRightsReserved => "All Rights Reserved",
            License::PublicDomain => "Public Domain",
        }
    }

    /// Human readable description.
    pub fn description(&self) -> &'static str {
        match self {
            License::CcBy => "Attribution",
            License::CcBySa => "Attribution-ShareAlike",
            License::CcByNd => "Attribution-NoDerivs",
            License::CcByNc => "Attribution-NonCommercial",
            License::CcByNcSa => "Attribution-NonCommercial-ShareAlike",
            License::CcByNcNd => "Attribution-NonCommercial-NoDerivs",
            License::AllRightsReserved => "All rights reserved by the copyright holder",
            License::PublicDomain => "No rights reserved",
        }
    }

    /// Whether the license requires a named copyright holder.
    pub fn requires_copyright_holder(&self) -> bool {
        !matches!(self, License::PublicDomain)
    }
}

impl fmt::Display for License {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.id())
    }
}

impl FromStr for License {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase().replace([' ', '_'], "-");
        match normalized.as_str() {
            "cc-by" => Ok(License::CcBy),
            "cc-by-sa" => Ok(License::CcBySa),
            "cc-by-nd" => Ok(License::CcByNd),
            "cc-by-nc" => Ok(License::CcByNc),
            "cc-by-nc-sa" => Ok(License::CcByNcSa),
            "cc-by-nc-nd" => Ok(License::CcByNcNd),
            "all-rights-reserved" => Ok(License::AllRightsReserved),
            "public-domain" => Ok(License::PublicDomain),
            _ => Err(format!("Unknown license: {}", s)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_license_from_str_accepts_ids_and_kebab_names() {
        assert_eq!("CC BY".parse::<License>().unwrap(), License::CcBy);
        assert_eq!("cc-by-nc-sa".parse::<License>().unwrap(), License::CcByNcSa);
        assert_eq!(
            "All Rights Reserved".parse::<License>().unwrap(),
            License::AllRightsReserved
        );
        assert!("gpl".parse::<License>().is_err());
    }

    #[test]
    fn test_public_domain_has_no_holder_requirement() {
        assert!(License::CcBy.requires_copyright_holder());
        assert!(!License::PublicDomain.requires_copyright_holder());
    }
}
