//! Per-version element strategies
//!
//! Everything that differs between schema levels lives here: element names,
//! entrySet attributes, and whether free-text attributes are allowed. The
//! writer asks the strategy once and never branches on the version itself.

use super::PsiVersion;

/// Schema-version strategy consulted by the document writer
pub trait ElementBuilder: Send + Sync {
    fn version(&self) -> PsiVersion;

    /// Attributes of the `entrySet` root element
    fn entry_set_attributes(&self) -> Vec<(&'static str, String)> {
        let version = self.version();
        let (level, ver, minor) = version.level_attrs();
        let mut attrs = vec![
            ("xmlns", version.namespace().to_string()),
            (
                "xmlns:xsi",
                "http://www.w3.org/2001/XMLSchema-instance".to_string(),
            ),
            ("xsi:schemaLocation", version.schema_location().to_string()),
            ("level", level.to_string()),
            ("version", ver.to_string()),
        ];
        if let Some(minor) = minor {
            attrs.push(("minorVersion", minor.to_string()));
        }
        attrs
    }

    /// Element name for one interactor definition
    fn interactor_element(&self) -> &'static str;

    /// Element name for one participant
    fn participant_element(&self) -> &'static str;

    /// Element name of a participant's reference to an interactor
    fn interactor_ref_element(&self) -> &'static str;

    /// Whether `attributeList` elements may be emitted
    fn supports_attributes(&self) -> bool;
}

/// PSI-MI level 1 strategy
pub struct Level1Builder;

impl ElementBuilder for Level1Builder {
    fn version(&self) -> PsiVersion {
        PsiVersion::V1
    }

    fn interactor_element(&self) -> &'static str {
        "proteinInteractor"
    }

    fn participant_element(&self) -> &'static str {
        "proteinParticipant"
    }

    fn interactor_ref_element(&self) -> &'static str {
        "proteinInteractorRef"
    }

    fn supports_attributes(&self) -> bool {
        false
    }
}

/// PSI-MI level 2 strategy
pub struct Level2Builder;

impl ElementBuilder for Level2Builder {
    fn version(&self) -> PsiVersion {
        PsiVersion::V2
    }

    fn interactor_element(&self) -> &'static str {
        "interactor"
    }

    fn participant_element(&self) -> &'static str {
        "participant"
    }

    fn interactor_ref_element(&self) -> &'static str {
        "interactorRef"
    }

    fn supports_attributes(&self) -> bool {
        true
    }
}

/// PSI-MI level 2.5 strategy
pub struct Level25Builder;

impl ElementBuilder for Level25Builder {
    fn version(&self) -> PsiVersion {
        PsiVersion::V25
    }

    fn interactor_element(&self) -> &'static str {
        "interactor"
    }

    fn participant_element(&self) -> &'static str {
        "participant"
    }

    fn interactor_ref_element(&self) -> &'static str {
        "interactorRef"
    }

    fn supports_attributes(&self) -> bool {
        true
    }
}

/// Select the strategy for a session, once
pub fn builder_for(version: PsiVersion) -> Box<dyn ElementBuilder> {
    match version {
        PsiVersion::V1 => Box::new(Level1Builder),
        PsiVersion::V2 => Box::new(Level2Builder),
        PsiVersion::V25 => Box::new(Level25Builder),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strategy_selection() {
        assert_eq!(builder_for(PsiVersion::V1).participant_element(), "proteinParticipant");
        assert_eq!(builder_for(PsiVersion::V25).participant_element(), "participant");
        assert!(!builder_for(PsiVersion::V1).supports_attributes());
        assert!(builder_for(PsiVersion::V2).supports_attributes());
    }

    #[test]
    fn test_entry_set_attributes_carry_schema_pin() {
        let attrs = builder_for(PsiVersion::V25).entry_set_attributes();
        let schema = attrs
            .iter()
            .find(|(name, _)| *name == "xsi:schemaLocation")
            .map(|(_, value)| value.clone())
            .unwrap();
        assert!(schema.contains("MIF254.xsd"));
        assert!(attrs.iter().any(|(name, value)| *name == "minorVersion" && value == "4"));
    }
}
