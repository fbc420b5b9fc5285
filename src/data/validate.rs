//! Structural and cross-reference checks over the raw catalog documents.
//! Works on untyped JSON so that every problem is reported, not just the first parse error.

use std::collections::{BTreeSet, HashSet};
use std::fmt;
use std::fs;
use std::path::Path;

use serde::Deserialize;
use serde_json::{Map, Value};

use crate::calc::SkillRank;
use crate::data::ability::DEFAULT_ABILITIES_FILE;
use crate::data::character::{Sex, DEFAULT_CHARACTERS_FILE};
use crate::data::combat_class::DEFAULT_CLASSES_FILE;
use crate::data::skill::Skill;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ValidationSeverity {
    Error,
    Warning,
    Info,
}

impl ValidationSeverity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Error => "error",
            Self::Warning => "warning",
            Self::Info => "info",
        }
    }
}

impl fmt::Display for ValidationSeverity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationDiagnostic {
    pub severity: ValidationSeverity,
    pub context: String,
    pub message: String,
}

impl fmt::Display for ValidationDiagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}: {}", self.severity, self.context, self.message)
    }
}

#[derive(Debug, Clone, Default)]
pub struct ValidationReport {
    pub diagnostics: Vec<ValidationDiagnostic>,
}

impl ValidationReport {
    pub fn push(
        &mut self,
        severity: ValidationSeverity,
        context: impl Into<String>,
        message: impl Into<String>,
    ) {
        self.diagnostics.push(ValidationDiagnostic {
            severity,
            context: context.into(),
            message: message.into(),
        });
    }

    pub fn has_errors(&self) -> bool {
        self.diagnostics
            .iter()
            .any(|diag| diag.severity == ValidationSeverity::Error)
    }

    pub fn count(&self, severity: ValidationSeverity) -> usize {
        self.diagnostics
            .iter()
            .filter(|diag| diag.severity == severity)
            .count()
    }
}

/// Read the three documents from `data_dir` and validate them together.
pub fn validate_catalog_dir(data_dir: &Path) -> Result<ValidationReport, String> {
    let read = |file: &str| -> Result<Value, String> {
        let path = data_dir.join(file);
        let raw = fs::read_to_string(&path)
            .map_err(|err| format!("unable to read '{}': {err}", path.display()))?;
        serde_json::from_str(&raw)
            .map_err(|err| format!("unable to parse json '{}': {err}", path.display()))
    };
    let characters = read(DEFAULT_CHARACTERS_FILE)?;
    let classes = read(DEFAULT_CLASSES_FILE)?;
    let abilities = read(DEFAULT_ABILITIES_FILE)?;
    Ok(validate_documents(&characters, &classes, &abilities))
}

/// Named entries of one document, for cross-reference checks.
struct Entries<'a> {
    document: &'static str,
    objects: Vec<(usize, String, &'a Map<String, Value>)>,
}

impl Entries<'_> {
    fn names(&self) -> BTreeSet<&str> {
        self.objects.iter().map(|(_, name, _)| name.as_str()).collect()
    }
}

pub fn validate_documents(characters: &Value, classes: &Value, abilities: &Value) -> ValidationReport {
    let mut report = ValidationReport::default();

    let characters = collect_entries(&mut report, "characters", characters);
    let classes = collect_entries(&mut report, "classes", classes);
    let abilities = collect_entries(&mut report, "abilities", abilities);

    let class_names = classes.names();
    let ability_names = abilities.names();
    let special_classes: BTreeSet<&str> = classes
        .objects
        .iter()
        .filter(|(_, _, obj)| obj.get("special").and_then(Value::as_bool).unwrap_or(false))
        .map(|(_, name, _)| name.as_str())
        .collect();

    let mut claimed_specials = HashSet::new();
    for (index, name, obj) in &characters.objects {
        let context = format!("characters[{index}] name='{name}'");
        validate_sex(&mut report, &format!("{context}.sex"), obj.get("sex"), true);

        if let Some(specials) = obj.get("specialClasses") {
            match specials.as_array() {
                Some(specials) => {
                    for special in specials {
                        let Some(special) = special.as_str() else {
                            report.push(
                                ValidationSeverity::Error,
                                format!("{context}.specialClasses"),
                                "expected class name strings",
                            );
                            continue;
                        };
                        claimed_specials.insert(special.to_string());
                        if !class_names.contains(special) {
                            report.push(
                                ValidationSeverity::Error,
                                format!("{context}.specialClasses"),
                                format!("unknown class '{special}'"),
                            );
                        } else if !special_classes.contains(special) {
                            report.push(
                                ValidationSeverity::Warning,
                                format!("{context}.specialClasses"),
                                format!("class '{special}' is not marked special"),
                            );
                        }
                    }
                }
                None => report.push(
                    ValidationSeverity::Error,
                    format!("{context}.specialClasses"),
                    "expected array",
                ),
            }
        }

        match obj.get("buddingTalentName") {
            None | Some(Value::Null) => {}
            Some(Value::String(talent)) if ability_names.contains(talent.as_str()) => {}
            Some(Value::String(talent)) => report.push(
                ValidationSeverity::Error,
                format!("{context}.buddingTalentName"),
                format!("unknown ability '{talent}'"),
            ),
            Some(_) => report.push(
                ValidationSeverity::Error,
                format!("{context}.buddingTalentName"),
                "expected string or null",
            ),
        }

        if let Some(flag) = obj.get("darkMagicUser") {
            if !flag.is_boolean() {
                report.push(
                    ValidationSeverity::Error,
                    format!("{context}.darkMagicUser"),
                    "expected boolean",
                );
            }
        }
    }

    for (index, name, obj) in &classes.objects {
        let context = format!("classes[{index}] name='{name}'");
        validate_sex(
            &mut report,
            &format!("{context}.sexRequirement"),
            obj.get("sexRequirement"),
            false,
        );
        match obj.get("skillRequirements") {
            Some(value) => validate_requirement_map(
                &mut report,
                &format!("{context}.skillRequirements"),
                value,
            ),
            None => report.push(
                ValidationSeverity::Info,
                format!("{context}.skillRequirements"),
                "no skill requirements; class is free to certify",
            ),
        }
        if special_classes.contains(name.as_str()) && !claimed_specials.contains(name) {
            report.push(
                ValidationSeverity::Info,
                context,
                "special class is not listed by any character",
            );
        }
    }

    for (index, name, obj) in &abilities.objects {
        let context = format!("abilities[{index}] name='{name}'");
        let skills = obj.get("skillRequirement");
        let class_list = obj.get("classRequirement");

        if let Some(skills) = skills {
            validate_requirement_map(&mut report, &format!("{context}.skillRequirement"), skills);
        }
        if let Some(class_list) = class_list {
            validate_class_list(
                &mut report,
                &format!("{context}.classRequirement"),
                class_list,
                &class_names,
            );
        }

        let has_classes = class_list
            .and_then(Value::as_array)
            .is_some_and(|list| !list.is_empty());
        match (skills.is_some(), has_classes) {
            (false, false) => report.push(
                ValidationSeverity::Warning,
                context.clone(),
                "declares neither skillRequirement nor classRequirement; nobody can learn it",
            ),
            (true, true) => report.push(
                ValidationSeverity::Warning,
                context.clone(),
                "declares both requirement kinds; skillRequirement takes precedence",
            ),
            _ => {}
        }

        for flag in ["darkMagic", "blackMagic"] {
            if obj.get(flag).is_some_and(|value| !value.is_boolean()) {
                report.push(
                    ValidationSeverity::Error,
                    format!("{context}.{flag}"),
                    "expected boolean",
                );
            }
        }
    }

    for document in [&characters, &classes, &abilities] {
        tracing::debug!(
            document = document.document,
            entries = document.objects.len(),
            "validated document"
        );
    }

    report
}

fn collect_entries<'a>(
    report: &mut ValidationReport,
    document: &'static str,
    payload: &'a Value,
) -> Entries<'a> {
    let mut entries = Entries {
        document,
        objects: Vec::new(),
    };
    let Some(items) = payload.as_array() else {
        report.push(ValidationSeverity::Error, document, "expected top-level JSON array");
        return entries;
    };

    let mut seen = HashSet::new();
    for (index, item) in items.iter().enumerate() {
        let context = format!("{document}[{index}]");
        let Some(object) = item.as_object() else {
            report.push(ValidationSeverity::Error, context, "entry is not an object");
            continue;
        };
        match object.get("name").and_then(Value::as_str) {
            Some(name) if !name.trim().is_empty() => {
                if !seen.insert(name.to_string()) {
                    report.push(
                        ValidationSeverity::Warning,
                        format!("{context}.name"),
                        format!("duplicate name '{name}'; the last entry wins"),
                    );
                }
                entries.objects.push((index, name.to_string(), object));
            }
            _ => report.push(
                ValidationSeverity::Error,
                format!("{context}.name"),
                "missing non-empty 'name'",
            ),
        }
    }
    entries
}

fn validate_sex(report: &mut ValidationReport, context: &str, value: Option<&Value>, required: bool) {
    match value {
        None | Some(Value::Null) if !required => {}
        Some(sex @ Value::String(_)) if Sex::deserialize(sex).is_ok() => {}
        None | Some(Value::Null) => {
            report.push(ValidationSeverity::Error, context, "missing 'male' or 'female'")
        }
        Some(other) => report.push(
            ValidationSeverity::Error,
            context,
            format!("expected 'male' or 'female', got {other}"),
        ),
    }
}

fn validate_requirement_map(report: &mut ValidationReport, context: &str, value: &Value) {
    let Some(map) = value.as_object() else {
        report.push(ValidationSeverity::Error, context, "expected object of skill -> rank");
        return;
    };
    for (skill, rank) in map {
        if Skill::from_key(skill).is_none() {
            report.push(
                ValidationSeverity::Error,
                format!("{context}.{skill}"),
                format!("unknown skill '{skill}'"),
            );
        }
        match rank.as_str() {
            Some(label) if label.parse::<SkillRank>().is_ok() => {}
            Some(label) => report.push(
                ValidationSeverity::Error,
                format!("{context}.{skill}"),
                format!("unknown skill rank '{label}'"),
            ),
            None => report.push(
                ValidationSeverity::Error,
                format!("{context}.{skill}"),
                "expected rank label string",
            ),
        }
    }
}

fn validate_class_list(
    report: &mut ValidationReport,
    context: &str,
    value: &Value,
    class_names: &BTreeSet<&str>,
) {
    let Some(list) = value.as_array() else {
        report.push(ValidationSeverity::Error, context, "expected array of class names");
        return;
    };
    for (index, entry) in list.iter().enumerate() {
        match entry.as_str() {
            Some(class) if class_names.contains(class) => {}
            Some(class) => report.push(
                ValidationSeverity::Error,
                format!("{context}[{index}]"),
                format!("unknown class '{class}'"),
            ),
            None => report.push(
                ValidationSeverity::Error,
                format!("{context}[{index}]"),
                "expected class name string",
            ),
        }
    }
    if list.len() > 1 {
        report.push(
            ValidationSeverity::Info,
            context,
            "only the first listed class is used for requirement totals",
        );
    }
}
