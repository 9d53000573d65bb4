use serde::{ Deserialize, Serialize };

/// Profile captured by the registration form. Values are kept exactly as typed.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistrationData {
    pub name: String,
    pub mobile: String,
    pub email: String,
    pub aadhar: String,
    pub address: String,
    pub state: String,
    pub district: String,
    pub income: String,
    pub category: String,
}
