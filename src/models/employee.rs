use chrono::NaiveDate;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Employee,
    Manager,
    Admin,
}

impl Role {
    /// Convert enum → DB string
    pub fn to_db_str(&self) -> &'static str {
        match self {
            Role::Employee => "employee",
            Role::Manager => "manager",
            Role::Admin => "admin",
        }
    }

    /// Convert DB string → enum
    pub fn from_db_str(s: &str) -> Option<Self> {
        match s {
            "employee" => Some(Role::Employee),
            "manager" => Some(Role::Manager),
            "admin" => Some(Role::Admin),
            _ => None,
        }
    }

    /// Helper: accept CLI input in any case
    pub fn from_code(code: &str) -> Option<Self> {
        Role::from_db_str(&code.trim().to_lowercase())
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct Employee {
    pub id: String,                      // ⇔ employees.id (TEXT PRIMARY KEY)
    pub name: String,                    // ⇔ employees.name
    pub email: Option<String>,           // ⇔ employees.email (UNIQUE)
    pub role: Role,                      // ⇔ employees.role
    pub department: Option<String>,      // ⇔ employees.department
    pub ctps: Option<String>,            // ⇔ employees.ctps (work card number)
    pub admission_date: Option<NaiveDate>, // ⇔ employees.admission_date (TEXT "YYYY-MM-DD")
}

impl Employee {
    pub fn new(id: &str, name: &str, role: Role) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            email: None,
            role,
            department: None,
            ctps: None,
            admission_date: None,
        }
    }

    pub fn department_str(&self) -> &str {
        self.department.as_deref().unwrap_or("--")
    }
}
