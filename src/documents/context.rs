//! Data gathered for a single generation call.

use chrono::NaiveDate;
use std::collections::BTreeMap;

use crate::hr::{Capacitacion, Empleado, Empresa, Sancion, Vacacion};

/// Event-specific record attached to a document.
#[derive(Debug, Clone)]
pub enum EventRecord {
    Ninguno,
    Sancion(Sancion),
    Vacacion(Vacacion),
    Capacitacion(Capacitacion),
}

/// Everything a document needs: records, issue date and caller supplied fields.
#[derive(Debug, Clone)]
pub struct DocumentContext {
    pub empresa: Empresa,
    pub empleado: Empleado,
    pub fecha: NaiveDate,
    pub evento: EventRecord,
    pub campos_extra: BTreeMap<String, String>,
}

impl DocumentContext {
    pub fn new(empresa: Empresa, empleado: Empleado, fecha: NaiveDate) -> Self {
        Self {
            empresa,
            empleado,
            fecha,
            evento: EventRecord::Ninguno,
            campos_extra: BTreeMap::new(),
        }
    }

    pub fn with_event(mut self, evento: EventRecord) -> Self {
        self.evento = evento;
        self
    }

    pub fn with_extra_fields(mut self, campos_extra: BTreeMap<String, String>) -> Self {
        self.campos_extra = campos_extra;
        self
    }
}
