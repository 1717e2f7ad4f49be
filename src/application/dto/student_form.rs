//! Student form DTOs.

/// Input field of the add-student form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FormField {
    Name,
    Surname,
    Patronymic,
    BirthDate,
    StudyStart,
    Faculty,
}

impl FormField {
    /// Fields in display order.
    pub const ALL: [Self; 6] = [
        Self::Name,
        Self::Surname,
        Self::Patronymic,
        Self::BirthDate,
        Self::StudyStart,
        Self::Faculty,
    ];

    /// Human-readable label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Name => "Name",
            Self::Surname => "Surname",
            Self::Patronymic => "Patronymic",
            Self::BirthDate => "Birth date",
            Self::StudyStart => "Start year",
            Self::Faculty => "Faculty",
        }
    }

    /// Input hint shown while the field is empty.
    #[must_use]
    pub const fn placeholder(self) -> &'static str {
        match self {
            Self::Patronymic => "optional",
            Self::BirthDate => "DD.MM.YYYY (optional)",
            Self::StudyStart => "YYYY",
            Self::Name | Self::Surname | Self::Faculty => "",
        }
    }
}

/// Raw, unvalidated form contents.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StudentForm {
    pub name: String,
    pub surname: String,
    pub patronymic: String,
    pub birth_date: String,
    pub study_start: String,
    pub faculty: String,
}

impl StudentForm {
    /// Returns the text of one field.
    #[must_use]
    pub fn get(&self, field: FormField) -> &str {
        match field {
            FormField::Name => &self.name,
            FormField::Surname => &self.surname,
            FormField::Patronymic => &self.patronymic,
            FormField::BirthDate => &self.birth_date,
            FormField::StudyStart => &self.study_start,
            FormField::Faculty => &self.faculty,
        }
    }

    /// Replaces the text of one field.
    pub fn set(&mut self, field: FormField, value: impl Into<String>) {
        let value = value.into();
        match field {
            FormField::Name => self.name = value,
            FormField::Surname => self.surname = value,
            FormField::Patronymic => self.patronymic = value,
            FormField::BirthDate => self.birth_date = value,
            FormField::StudyStart => self.study_start = value,
            FormField::Faculty => self.faculty = value,
        }
    }
}
