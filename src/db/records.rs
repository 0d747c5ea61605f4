//! Read-only HR record queries, always scoped to the tenant

use super::{PgRepository, RepositoryError};
use crate::hr::{Capacitacion, Empleado, Empresa, Sancion, Vacacion};
use uuid::Uuid;

impl PgRepository {
    pub async fn get_company_row(&self, empresa_id: Uuid) -> Result<Option<Empresa>, RepositoryError> {
        let row = sqlx::query_as::<_, Empresa>(
            "SELECT id, nombre, cuit, direccion, telefono, email, representante_legal \
             FROM empresas WHERE id = $1",
        )
        .bind(empresa_id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row)
    }

    pub async fn get_employee_row(
        &self,
        empresa_id: Uuid,
        empleado_id: Uuid,
    ) -> Result<Option<Empleado>, RepositoryError> {
        let row = sqlx::query_as::<_, Empleado>(
            "SELECT id, empresa_id, nombre, apellido, dni, cuil, legajo, puesto, departamento, \
             fecha_ingreso, direccion, email \
             FROM empleados WHERE id = $1 AND empresa_id = $2",
        )
        .bind(empleado_id)
        .bind(empresa_id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row)
    }

    pub async fn get_sanction_row(
        &self,
        empresa_id: Uuid,
        id: Uuid,
    ) -> Result<Option<Sancion>, RepositoryError> {
        let row = sqlx::query_as::<_, Sancion>(
            "SELECT id, empresa_id, empleado_id, tipo, motivo, descripcion, fecha, dias_suspension, \
             fecha_inicio, fecha_fin, fecha_reincorporacion \
             FROM sanciones WHERE id = $1 AND empresa_id = $2",
        )
        .bind(id)
        .bind(empresa_id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row)
    }

    pub async fn get_vacation_row(
        &self,
        empresa_id: Uuid,
        id: Uuid,
    ) -> Result<Option<Vacacion>, RepositoryError> {
        let row = sqlx::query_as::<_, Vacacion>(
            "SELECT id, empresa_id, empleado_id, periodo, fecha_inicio, fecha_fin, dias, \
             fecha_reincorporacion \
             FROM vacaciones WHERE id = $1 AND empresa_id = $2",
        )
        .bind(id)
        .bind(empresa_id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row)
    }

    pub async fn get_training_row(
        &self,
        empresa_id: Uuid,
        id: Uuid,
    ) -> Result<Option<Capacitacion>, RepositoryError> {
        let row = sqlx::query_as::<_, Capacitacion>(
            "SELECT id, empresa_id, empleado_id, nombre, institucion, instructor, fecha, duracion_horas \
             FROM capacitaciones WHERE id = $1 AND empresa_id = $2",
        )
        .bind(id)
        .bind(empresa_id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row)
    }
}
