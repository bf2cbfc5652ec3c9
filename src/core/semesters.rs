//! Semester-by-semester listing of engineering study materials

use serde::{Deserialize, Serialize};

use super::catalog::{CatalogError, Category};

const BUILTIN_SEMESTERS: &str = include_str!("../../assets/semesters.json");

/// A downloadable item listed under a semester
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Material {
    pub id: String,
    pub title: String,
    pub description: String,
    pub kind: Category,
    pub file_size: String,
    pub download_count: u64,
    pub file: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Semester {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub subjects: Vec<String>,
    #[serde(default)]
    pub materials: Vec<Material>,
}

impl Semester {
    /// Ordinal shown in the round badge: the leading number of the name
    /// ("10" for "10th Semester"), else its first character
    pub fn badge(&self) -> String {
        let digits: String = self
            .name
            .chars()
            .take_while(|ch| ch.is_ascii_digit())
            .collect();
        if !digits.is_empty() {
            return digits;
        }
        self.name.chars().next().map(String::from).unwrap_or_default()
    }

    /// Subjects joined for the card subtitle
    pub fn subject_line(&self) -> String {
        self.subjects.join(" \u{2022} ")
    }
}

#[derive(Debug, Clone, Default)]
pub struct SemesterCatalog {
    semesters: Vec<Semester>,
}

impl SemesterCatalog {
    pub fn builtin() -> Result<Self, CatalogError> {
        let semesters: Vec<Semester> = serde_json::from_str(BUILTIN_SEMESTERS)?;
        Ok(Self { semesters })
    }

    pub fn semesters(&self) -> &[Semester] {
        &self.semesters
    }

    /// Find a material by id across all semesters
    pub fn material(&self, id: &str) -> Option<&Material> {
        self.semesters
            .iter()
            .flat_map(|semester| semester.materials.iter())
            .find(|material| material.id == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_semesters_load() {
        let catalog = SemesterCatalog::builtin().unwrap();
        assert_eq!(catalog.semesters().len(), 8);

        let first = &catalog.semesters()[0];
        assert_eq!(first.name, "1st Semester");
        assert_eq!(first.badge(), "1");
        assert!(first.subject_line().starts_with("Mathematics-I \u{2022} Physics"));
    }

    #[test]
    fn test_material_lookup() {
        let catalog = SemesterCatalog::builtin().unwrap();
        let material = catalog.material("s4-placement-1").unwrap();
        assert_eq!(material.title, "System Design Interview Guide");
        assert_eq!(material.kind, Category::Placement);
        assert!(catalog.material("missing").is_none());
    }

    #[test]
    fn test_semester_without_materials() {
        let json = r#"[{ "id": "sem9", "name": "9th Semester" }]"#;
        let semesters: Vec<Semester> = serde_json::from_str(json).unwrap();
        assert!(semesters[0].materials.is_empty());
        assert!(semesters[0].subject_line().is_empty());
    }

    #[test]
    fn test_badge_keeps_every_leading_digit() {
        let semester = |name: &str| Semester {
            id: "s".to_string(),
            name: name.to_string(),
            subjects: Vec::new(),
            materials: Vec::new(),
        };
        assert_eq!(semester("10th Semester").badge(), "10");
        assert_eq!(semester("2nd Semester").badge(), "2");
        assert_eq!(semester("Final Year").badge(), "F");
        assert_eq!(semester("").badge(), "");
    }
}
