use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Tenant company.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Empresa {
    pub id: Uuid,
    pub nombre: String,
    pub cuit: Option<String>,
    pub direccion: Option<String>,
    pub telefono: Option<String>,
    pub email: Option<String>,
    pub representante_legal: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Empleado {
    pub id: Uuid,
    pub empresa_id: Uuid,
    pub nombre: String,
    pub apellido: String,
    pub dni: Option<String>,
    pub cuil: Option<String>,
    pub legajo: Option<String>,
    pub puesto: Option<String>,
    pub departamento: Option<String>,
    pub fecha_ingreso: Option<NaiveDate>,
    pub direccion: Option<String>,
    pub email: Option<String>,
}

impl Empleado {
    pub fn nombre_completo(&self) -> String {
        format!("{} {}", self.nombre.trim(), self.apellido.trim())
            .trim()
            .to_string()
    }
}

/// Disciplinary record (warning or suspension).
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Sancion {
    pub id: Uuid,
    pub empresa_id: Uuid,
    pub empleado_id: Uuid,
    pub tipo: String,
    pub motivo: Option<String>,
    pub descripcion: Option<String>,
    pub fecha: NaiveDate,
    pub dias_suspension: Option<i32>,
    pub fecha_inicio: Option<NaiveDate>,
    pub fecha_fin: Option<NaiveDate>,
    pub fecha_reincorporacion: Option<NaiveDate>,
}

impl Sancion {
    /// Return-to-work date, defaulting to the day after the suspension ends.
    pub fn reincorporacion(&self) -> Option<NaiveDate> {
        self.fecha_reincorporacion
            .or_else(|| self.fecha_fin.and_then(|fin| fin.succ_opt()))
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Vacacion {
    pub id: Uuid,
    pub empresa_id: Uuid,
    pub empleado_id: Uuid,
    pub periodo: Option<String>,
    pub fecha_inicio: NaiveDate,
    pub fecha_fin: NaiveDate,
    pub dias: i32,
    pub fecha_reincorporacion: Option<NaiveDate>,
}

impl Vacacion {
    pub fn reincorporacion(&self) -> Option<NaiveDate> {
        self.fecha_reincorporacion.or_else(|| self.fecha_fin.succ_opt())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Capacitacion {
    pub id: Uuid,
    pub empresa_id: Uuid,
    pub empleado_id: Uuid,
    pub nombre: String,
    pub institucion: Option<String>,
    pub instructor: Option<String>,
    pub fecha: NaiveDate,
    pub duracion_horas: Option<i32>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn empleado(nombre: &str, apellido: &str) -> Empleado {
        Empleado {
            id: Uuid::new_v4(),
            empresa_id: Uuid::new_v4(),
            nombre: nombre.to_string(),
            apellido: apellido.to_string(),
            dni: None,
            cuil: None,
            legajo: None,
            puesto: None,
            departamento: None,
            fecha_ingreso: None,
            direccion: None,
            email: None,
        }
    }

    #[test]
    fn test_nombre_completo() {
        assert_eq!(empleado("Ana", "Pérez").nombre_completo(), "Ana Pérez");
        assert_eq!(empleado(" Ana ", "").nombre_completo(), "Ana");
    }

    #[test]
    fn test_vacation_reincorporation_defaults_to_next_day() {
        let vacacion = Vacacion {
            id: Uuid::new_v4(),
            empresa_id: Uuid::new_v4(),
            empleado_id: Uuid::new_v4(),
            periodo: Some("2026".to_string()),
            fecha_inicio: NaiveDate::from_ymd_opt(2026, 1, 5).unwrap(),
            fecha_fin: NaiveDate::from_ymd_opt(2026, 1, 18).unwrap(),
            dias: 14,
            fecha_reincorporacion: None,
        };

        assert_eq!(
            vacacion.reincorporacion(),
            NaiveDate::from_ymd_opt(2026, 1, 19)
        );
    }

    #[test]
    fn test_sanction_explicit_reincorporation_wins() {
        let sancion = Sancion {
            id: Uuid::new_v4(),
            empresa_id: Uuid::new_v4(),
            empleado_id: Uuid::new_v4(),
            tipo: "suspension".to_string(),
            motivo: None,
            descripcion: None,
            fecha: NaiveDate::from_ymd_opt(2026, 3, 2).unwrap(),
            dias_suspension: Some(3),
            fecha_inicio: NaiveDate::from_ymd_opt(2026, 3, 3),
            fecha_fin: NaiveDate::from_ymd_opt(2026, 3, 5),
            fecha_reincorporacion: NaiveDate::from_ymd_opt(2026, 3, 9),
        };

        assert_eq!(sancion.reincorporacion(), NaiveDate::from_ymd_opt(2026, 3, 9));
    }
}
