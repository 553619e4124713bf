use serde::{Deserialize, Serialize};

/// Identifier assigned by the storage layer when an employee is first saved.
pub type EmployeeId = i64;

/// A stored employee record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Employee {
    pub id: EmployeeId,
    pub first_name: String,
    pub last_name: String,
    /// Secondary unique key, compared case-sensitively.
    pub email: String,
    pub department: String,
}

/// An employee that has not been assigned an id yet.
///
/// Used both for creation and as the full replacement value of an update.
/// An `id` present in incoming JSON is ignored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmployeeDraft {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub department: String,
}

impl EmployeeDraft {
    pub fn new(
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        email: impl Into<String>,
        department: impl Into<String>,
    ) -> Self {
        Self {
            first_name: first_name.into(),
            last_name: last_name.into(),
            email: email.into(),
            department: department.into(),
        }
    }

    /// Attach an id, producing the stored form.
    pub fn with_id(self, id: EmployeeId) -> Employee {
        Employee {
            id,
            first_name: self.first_name,
            last_name: self.last_name,
            email: self.email,
            department: self.department,
        }
    }
}

impl Employee {
    /// Overwrite every mutable field with the draft's values. The id is kept.
    pub fn apply(&mut self, draft: EmployeeDraft) {
        self.first_name = draft.first_name;
        self.last_name = draft.last_name;
        self.email = draft.email;
        self.department = draft.department;
    }

    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

impl From<Employee> for EmployeeDraft {
    fn from(employee: Employee) -> Self {
        Self {
            first_name: employee.first_name,
            last_name: employee.last_name,
            email: employee.email,
            department: employee.department,
        }
    }
}
