#![allow(dead_code)]

use async_trait::async_trait;
use chrono::NaiveDate;
use hr_docs_server::auth::{issue_token, AppMetadata, Claims};
use hr_docs_server::db::{AppState, DocumentRepository, RepositoryError};
use hr_docs_server::documents::DocumentType;
use hr_docs_server::hr::{Capacitacion, Empleado, Empresa, Sancion, Vacacion};
use hr_docs_server::storage::ObjectStorage;
use hr_docs_server::templates::DocumentTemplate;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::Mutex;
use uuid::Uuid;

pub const JWT_SECRET: &str = "test-supabase-jwt-secret";

/// In-memory repository. `fail_templates` simulates an unreachable template
/// backend; `fail_records` does the same for HR records.
#[derive(Default)]
pub struct MockRepository {
    pub templates: Mutex<Vec<DocumentTemplate>>,
    pub empresas: Vec<Empresa>,
    pub empleados: Vec<Empleado>,
    pub sanciones: Vec<Sancion>,
    pub vacaciones: Vec<Vacacion>,
    pub capacitaciones: Vec<Capacitacion>,
    pub fail_templates: bool,
    pub fail_records: bool,
}

impl MockRepository {
    fn records_guard(&self) -> Result<(), RepositoryError> {
        if self.fail_records {
            Err(RepositoryError::Unavailable("records backend down".to_string()))
        } else {
            Ok(())
        }
    }

    fn templates_guard(&self) -> Result<(), RepositoryError> {
        if self.fail_templates {
            Err(RepositoryError::Unavailable("templates backend down".to_string()))
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl DocumentRepository for MockRepository {
    async fn find_default_template(
        &self,
        empresa_id: Uuid,
        tipo: DocumentType,
    ) -> Result<Option<DocumentTemplate>, RepositoryError> {
        self.templates_guard()?;
        let templates = self.templates.lock().await;
        let candidates = templates.iter().filter(|t| t.is_default_for(tipo));
        let own = candidates
            .clone()
            .find(|t| t.empresa_id == Some(empresa_id));
        Ok(own
            .or_else(|| candidates.clone().find(|t| t.empresa_id.is_none()))
            .cloned())
    }

    async fn list_templates(
        &self,
        empresa_id: Uuid,
    ) -> Result<Vec<DocumentTemplate>, RepositoryError> {
        self.templates_guard()?;
        let templates = self.templates.lock().await;
        Ok(templates
            .iter()
            .filter(|t| t.empresa_id.is_none() || t.empresa_id == Some(empresa_id))
            .cloned()
            .collect())
    }

    async fn get_template(
        &self,
        empresa_id: Uuid,
        id: Uuid,
    ) -> Result<Option<DocumentTemplate>, RepositoryError> {
        self.templates_guard()?;
        let templates = self.templates.lock().await;
        Ok(templates
            .iter()
            .find(|t| t.id == id && t.empresa_id == Some(empresa_id))
            .cloned())
    }

    async fn save_template(&self, template: &DocumentTemplate) -> Result<(), RepositoryError> {
        self.templates_guard()?;
        let mut templates = self.templates.lock().await;
        if template.es_default {
            for other in templates.iter_mut() {
                if other.id != template.id
                    && other.empresa_id == template.empresa_id
                    && other.tipo == template.tipo
                {
                    other.es_default = false;
                }
            }
        }
        match templates.iter_mut().find(|t| t.id == template.id) {
            Some(existing) => *existing = template.clone(),
            None => templates.push(template.clone()),
        }
        Ok(())
    }

    async fn get_company(&self, empresa_id: Uuid) -> Result<Option<Empresa>, RepositoryError> {
        self.records_guard()?;
        Ok(self.empresas.iter().find(|e| e.id == empresa_id).cloned())
    }

    async fn get_employee(
        &self,
        empresa_id: Uuid,
        empleado_id: Uuid,
    ) -> Result<Option<Empleado>, RepositoryError> {
        self.records_guard()?;
        Ok(self
            .empleados
            .iter()
            .find(|e| e.id == empleado_id && e.empresa_id == empresa_id)
            .cloned())
    }

    async fn get_sanction(
        &self,
        empresa_id: Uuid,
        id: Uuid,
    ) -> Result<Option<Sancion>, RepositoryError> {
        self.records_guard()?;
        Ok(self
            .sanciones
            .iter()
            .find(|s| s.id == id && s.empresa_id == empresa_id)
            .cloned())
    }

    async fn get_vacation(
        &self,
        empresa_id: Uuid,
        id: Uuid,
    ) -> Result<Option<Vacacion>, RepositoryError> {
        self.records_guard()?;
        Ok(self
            .vacaciones
            .iter()
            .find(|v| v.id == id && v.empresa_id == empresa_id)
            .cloned())
    }

    async fn get_training(
        &self,
        empresa_id: Uuid,
        id: Uuid,
    ) -> Result<Option<Capacitacion>, RepositoryError> {
        self.records_guard()?;
        Ok(self
            .capacitaciones
            .iter()
            .find(|c| c.id == id && c.empresa_id == empresa_id)
            .cloned())
    }
}

/// Mock implementation of ObjectStorage for testing
#[derive(Default)]
pub struct MockObjectStorage {
    files: Mutex<HashMap<String, Vec<u8>>>,
    pub fail_uploads: bool,
}

impl MockObjectStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing() -> Self {
        Self {
            fail_uploads: true,
            ..Self::default()
        }
    }

    pub async fn file(&self, path: &str) -> Option<Vec<u8>> {
        self.files.lock().await.get(path).cloned()
    }

    pub async fn file_count(&self) -> usize {
        self.files.lock().await.len()
    }
}

#[async_trait]
impl ObjectStorage for MockObjectStorage {
    async fn upload_file(&self, path: &str, file_data: &[u8]) -> Result<(), String> {
        if self.fail_uploads {
            return Err("storage returned 503".to_string());
        }
        self.files
            .lock()
            .await
            .insert(path.to_string(), file_data.to_vec());
        Ok(())
    }

    fn get_public_url(&self, path: &str) -> String {
        format!("http://storage.test/public/{}", path)
    }
}

/// One company with one employee and one record of each event kind.
pub struct Fixture {
    pub empresa_id: Uuid,
    pub empleado_id: Uuid,
    pub sancion_id: Uuid,
    pub vacacion_id: Uuid,
    pub capacitacion_id: Uuid,
}

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

pub fn seeded_repository() -> (MockRepository, Fixture) {
    let fixture = Fixture {
        empresa_id: Uuid::new_v4(),
        empleado_id: Uuid::new_v4(),
        sancion_id: Uuid::new_v4(),
        vacacion_id: Uuid::new_v4(),
        capacitacion_id: Uuid::new_v4(),
    };

    let repo = MockRepository {
        empresas: vec![Empresa {
            id: fixture.empresa_id,
            nombre: "Metalúrgica Sur SA".to_string(),
            cuit: Some("30-71234567-9".to_string()),
            direccion: Some("Av. Belgrano 1200, Rosario".to_string()),
            telefono: None,
            email: Some("rrhh@metalurgicasur.com.ar".to_string()),
            representante_legal: Some("Carlos Gómez".to_string()),
        }],
        empleados: vec![Empleado {
            id: fixture.empleado_id,
            empresa_id: fixture.empresa_id,
            nombre: "Ana".to_string(),
            apellido: "Pérez".to_string(),
            dni: Some("30111222".to_string()),
            cuil: Some("27-30111222-4".to_string()),
            legajo: Some("0042".to_string()),
            puesto: Some("Operaria".to_string()),
            departamento: Some("Producción".to_string()),
            fecha_ingreso: Some(date(2019, 3, 1)),
            direccion: None,
            email: None,
        }],
        sanciones: vec![Sancion {
            id: fixture.sancion_id,
            empresa_id: fixture.empresa_id,
            empleado_id: fixture.empleado_id,
            tipo: "suspension".to_string(),
            motivo: Some("Tardanza".to_string()),
            descripcion: Some("Llegadas tarde reiteradas durante septiembre".to_string()),
            fecha: date(2026, 10, 1),
            dias_suspension: Some(2),
            fecha_inicio: Some(date(2026, 10, 5)),
            fecha_fin: Some(date(2026, 10, 6)),
            fecha_reincorporacion: None,
        }],
        vacaciones: vec![Vacacion {
            id: fixture.vacacion_id,
            empresa_id: fixture.empresa_id,
            empleado_id: fixture.empleado_id,
            periodo: Some("2026".to_string()),
            fecha_inicio: date(2026, 12, 26),
            fecha_fin: date(2027, 1, 8),
            dias: 14,
            fecha_reincorporacion: None,
        }],
        capacitaciones: vec![Capacitacion {
            id: fixture.capacitacion_id,
            empresa_id: fixture.empresa_id,
            empleado_id: fixture.empleado_id,
            nombre: "Seguridad e higiene".to_string(),
            institucion: Some("UTN Rosario".to_string()),
            instructor: None,
            fecha: date(2026, 9, 20),
            duracion_horas: Some(8),
        }],
        ..MockRepository::default()
    };

    (repo, fixture)
}

pub fn app_state(repo: MockRepository, storage: MockObjectStorage) -> AppState {
    AppState::new_with_repository_and_storage(Arc::new(repo), Arc::new(storage), JWT_SECRET.to_string())
}

/// Signed Supabase-style token for `empresa_id`.
pub fn bearer_token(empresa_id: Option<Uuid>) -> String {
    let now = chrono::Utc::now().timestamp() as usize;
    let claims = Claims {
        sub: Uuid::new_v4().to_string(),
        exp: now + 3600,
        iat: now,
        aud: Some("authenticated".to_string()),
        role: Some("authenticated".to_string()),
        email: Some("rrhh@metalurgicasur.com.ar".to_string()),
        app_metadata: AppMetadata { empresa_id },
    };
    let token = issue_token(&claims, JWT_SECRET).unwrap();
    format!("Bearer {}", token)
}

pub fn template(
    empresa_id: Option<Uuid>,
    tipo: DocumentType,
    html: &str,
) -> DocumentTemplate {
    let mut template = DocumentTemplate::new(
        Uuid::new_v4(),
        tipo,
        format!("Plantilla {}", tipo),
        html.to_string(),
        true,
        true,
    );
    template.empresa_id = empresa_id;
    template
}
