//! Consulta record and payload types.

use serde::{Deserialize, Serialize};

/// Appointment record as returned by the API listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Consulta {
    /// Identifier assigned by the API.
    pub id: u64,
    /// Patient name.
    pub nome: String,
    /// Birth date.
    pub data_nascimento: String,
    /// Appointment date.
    pub data_atendimento: String,
    /// Appointment time.
    pub horario: String,
    /// Appointment type.
    pub tipo: String,
}

/// Fields submitted by the create and edit forms.
///
/// All five are required; none is format-checked here.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ConsultaForm {
    pub nome: String,
    pub data_nascimento: String,
    pub data_atendimento: String,
    pub horario: String,
    pub tipo: String,
}

/// Create payload sent to `POST {base}/inserir`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewConsulta {
    pub nome: String,
    pub data_nascimento: String,
    pub data_atendimento: String,
    pub horario: String,
    pub tipo: String,
}

impl From<ConsultaForm> for NewConsulta {
    fn from(form: ConsultaForm) -> Self {
        Self {
            nome: form.nome,
            data_nascimento: form.data_nascimento,
            data_atendimento: form.data_atendimento,
            horario: form.horario,
            tipo: form.tipo,
        }
    }
}

/// Update payload sent to `POST {base}/atualizar`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConsultaUpdate {
    pub id: u64,
    #[serde(flatten)]
    pub fields: NewConsulta,
}

impl ConsultaUpdate {
    /// Build the update payload for `id` from submitted form fields.
    pub fn new(id: u64, form: ConsultaForm) -> Self {
        Self {
            id,
            fields: form.into(),
        }
    }
}

/// Delete payload sent to `DELETE {base}/excluir`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConsultaId {
    pub id: u64,
}
