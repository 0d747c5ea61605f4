//! Placeholder vocabulary and the per-call replacement bag.

use serde::Serialize;
use std::collections::BTreeMap;

use super::common::{format_optional_date, format_short_date, format_spanish_date};
use super::context::{DocumentContext, EventRecord};

pub const EMPRESA_TOKENS: &[&str] = &[
    "empresa_nombre",
    "empresa_cuit",
    "empresa_direccion",
    "empresa_telefono",
    "empresa_email",
    "empresa_representante",
];

pub const EMPLEADO_TOKENS: &[&str] = &[
    "empleado_nombre",
    "empleado_apellido",
    "empleado_nombre_completo",
    "empleado_dni",
    "empleado_cuil",
    "empleado_legajo",
    "empleado_puesto",
    "empleado_departamento",
    "empleado_fecha_ingreso",
    "empleado_direccion",
    "empleado_email",
];

pub const FECHA_TOKENS: &[&str] = &["fecha_actual", "fecha_actual_corta", "anio_actual"];

pub const SANCION_TOKENS: &[&str] = &[
    "tipo_sancion",
    "motivo",
    "descripcion",
    "fecha_sancion",
    "dias_suspension",
    "fecha_inicio_suspension",
    "fecha_fin_suspension",
    "fecha_reincorporacion",
];

pub const VACACIONES_TOKENS: &[&str] = &[
    "periodo_vacaciones",
    "dias_vacaciones",
    "fecha_inicio_vacaciones",
    "fecha_fin_vacaciones",
    "fecha_reincorporacion_vacaciones",
];

pub const CAPACITACION_TOKENS: &[&str] = &[
    "capacitacion_nombre",
    "capacitacion_institucion",
    "capacitacion_instructor",
    "capacitacion_fecha",
    "capacitacion_horas",
];

/// Documented token vocabulary grouped by category.
pub const VOCABULARY: [(&str, &[&str]); 6] = [
    ("empresa", EMPRESA_TOKENS),
    ("empleado", EMPLEADO_TOKENS),
    ("fecha", FECHA_TOKENS),
    ("sancion", SANCION_TOKENS),
    ("vacaciones", VACACIONES_TOKENS),
    ("capacitacion", CAPACITACION_TOKENS),
];

pub fn is_vocabulary_token(name: &str) -> bool {
    VOCABULARY
        .iter()
        .any(|(_, tokens)| tokens.contains(&name))
}

/// Flat token name to value mapping used for substitution.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ReplacementMap(BTreeMap<String, String>);

impl ReplacementMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.0.insert(key.into(), value.into());
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    /// Value for `key`, empty when absent.
    pub fn value(&self, key: &str) -> &str {
        self.get(key).unwrap_or("")
    }

    /// True when the value is present and not blank.
    pub fn is_filled(&self, key: &str) -> bool {
        self.get(key).map_or(false, |v| !v.trim().is_empty())
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn into_inner(self) -> BTreeMap<String, String> {
        self.0
    }

    /// Build the bag for a generation call. Every vocabulary token is present,
    /// empty when its source field is missing; extra fields are applied last.
    pub fn from_context(ctx: &DocumentContext) -> Self {
        let mut map = Self::new();
        for (_, tokens) in VOCABULARY.iter() {
            for token in tokens.iter() {
                map.insert(*token, "");
            }
        }

        let empresa = &ctx.empresa;
        map.insert("empresa_nombre", empresa.nombre.clone());
        map.insert("empresa_cuit", opt(&empresa.cuit));
        map.insert("empresa_direccion", opt(&empresa.direccion));
        map.insert("empresa_telefono", opt(&empresa.telefono));
        map.insert("empresa_email", opt(&empresa.email));
        map.insert("empresa_representante", opt(&empresa.representante_legal));

        let empleado = &ctx.empleado;
        map.insert("empleado_nombre", empleado.nombre.trim());
        map.insert("empleado_apellido", empleado.apellido.trim());
        map.insert("empleado_nombre_completo", empleado.nombre_completo());
        map.insert("empleado_dni", opt(&empleado.dni));
        map.insert("empleado_cuil", opt(&empleado.cuil));
        map.insert("empleado_legajo", opt(&empleado.legajo));
        map.insert("empleado_puesto", opt(&empleado.puesto));
        map.insert("empleado_departamento", opt(&empleado.departamento));
        map.insert(
            "empleado_fecha_ingreso",
            format_optional_date(empleado.fecha_ingreso),
        );
        map.insert("empleado_direccion", opt(&empleado.direccion));
        map.insert("empleado_email", opt(&empleado.email));

        map.insert("fecha_actual", format_spanish_date(ctx.fecha));
        map.insert("fecha_actual_corta", format_short_date(ctx.fecha));
        map.insert("anio_actual", ctx.fecha.format("%Y").to_string());

        match &ctx.evento {
            EventRecord::Ninguno => {}
            EventRecord::Sancion(sancion) => {
                map.insert("tipo_sancion", sancion.tipo.clone());
                map.insert("motivo", opt(&sancion.motivo));
                map.insert("descripcion", opt(&sancion.descripcion));
                map.insert("fecha_sancion", format_spanish_date(sancion.fecha));
                map.insert(
                    "dias_suspension",
                    sancion
                        .dias_suspension
                        .filter(|dias| *dias > 0)
                        .map(|dias| dias.to_string())
                        .unwrap_or_default(),
                );
                map.insert(
                    "fecha_inicio_suspension",
                    format_optional_date(sancion.fecha_inicio),
                );
                map.insert(
                    "fecha_fin_suspension",
                    format_optional_date(sancion.fecha_fin),
                );
                map.insert(
                    "fecha_reincorporacion",
                    format_optional_date(sancion.reincorporacion()),
                );
            }
            EventRecord::Vacacion(vacacion) => {
                map.insert("periodo_vacaciones", opt(&vacacion.periodo));
                map.insert("dias_vacaciones", vacacion.dias.to_string());
                map.insert(
                    "fecha_inicio_vacaciones",
                    format_spanish_date(vacacion.fecha_inicio),
                );
                map.insert(
                    "fecha_fin_vacaciones",
                    format_spanish_date(vacacion.fecha_fin),
                );
                map.insert(
                    "fecha_reincorporacion_vacaciones",
                    format_optional_date(vacacion.reincorporacion()),
                );
            }
            EventRecord::Capacitacion(capacitacion) => {
                map.insert("capacitacion_nombre", capacitacion.nombre.clone());
                map.insert("capacitacion_institucion", opt(&capacitacion.institucion));
                map.insert("capacitacion_instructor", opt(&capacitacion.instructor));
                map.insert(
                    "capacitacion_fecha",
                    format_spanish_date(capacitacion.fecha),
                );
                map.insert(
                    "capacitacion_horas",
                    capacitacion
                        .duracion_horas
                        .map(|horas| horas.to_string())
                        .unwrap_or_default(),
                );
            }
        }

        for (key, value) in &ctx.campos_extra {
            map.insert(key.clone(), value.clone());
        }

        map
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for ReplacementMap {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut map = Self::new();
        for (key, value) in iter {
            map.insert(key, value);
        }
        map
    }
}

fn opt(value: &Option<String>) -> String {
    value.as_deref().map(str::trim).unwrap_or("").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hr::{Empleado, Empresa, Sancion};
    use chrono::NaiveDate;
    use uuid::Uuid;

    fn context() -> DocumentContext {
        let empresa_id = Uuid::new_v4();
        let empresa = Empresa {
            id: empresa_id,
            nombre: "Metalúrgica Sur S.A.".to_string(),
            cuit: Some("30-71234567-8".to_string()),
            direccion: None,
            telefono: None,
            email: None,
            representante_legal: Some("Carlos Gómez".to_string()),
        };
        let empleado = Empleado {
            id: Uuid::new_v4(),
            empresa_id,
            nombre: "Ana".to_string(),
            apellido: "Pérez".to_string(),
            dni: Some("30111222".to_string()),
            cuil: None,
            legajo: Some("0042".to_string()),
            puesto: Some("Operaria".to_string()),
            departamento: None,
            fecha_ingreso: NaiveDate::from_ymd_opt(2019, 4, 1),
            direccion: None,
            email: None,
        };
        DocumentContext::new(
            empresa,
            empleado,
            NaiveDate::from_ymd_opt(2026, 10, 17).unwrap(),
        )
    }

    #[test]
    fn test_every_vocabulary_token_is_present() {
        let map = ReplacementMap::from_context(&context());
        for (_, tokens) in VOCABULARY.iter() {
            for token in tokens.iter() {
                assert!(map.contains_key(token), "missing {}", token);
            }
        }
    }

    #[test]
    fn test_absent_fields_map_to_empty_string() {
        let map = ReplacementMap::from_context(&context());
        assert_eq!(map.value("empresa_direccion"), "");
        assert_eq!(map.value("motivo"), "");
        assert!(!map.is_filled("motivo"));
    }

    #[test]
    fn test_employee_and_date_values() {
        let map = ReplacementMap::from_context(&context());
        assert_eq!(map.value("empleado_nombre"), "Ana");
        assert_eq!(map.value("empleado_nombre_completo"), "Ana Pérez");
        assert_eq!(map.value("empleado_fecha_ingreso"), "1 de abril de 2019");
        assert_eq!(map.value("fecha_actual"), "17 de octubre de 2026");
        assert_eq!(map.value("fecha_actual_corta"), "17/10/2026");
        assert_eq!(map.value("anio_actual"), "2026");
    }

    #[test]
    fn test_sanction_values() {
        let ctx = context();
        let sancion = Sancion {
            id: Uuid::new_v4(),
            empresa_id: ctx.empresa.id,
            empleado_id: ctx.empleado.id,
            tipo: "suspension".to_string(),
            motivo: Some("Tardanza reiterada".to_string()),
            descripcion: None,
            fecha: NaiveDate::from_ymd_opt(2026, 10, 10).unwrap(),
            dias_suspension: Some(2),
            fecha_inicio: NaiveDate::from_ymd_opt(2026, 10, 13),
            fecha_fin: NaiveDate::from_ymd_opt(2026, 10, 14),
            fecha_reincorporacion: None,
        };
        let map = ReplacementMap::from_context(&ctx.with_event(EventRecord::Sancion(sancion)));

        assert_eq!(map.value("motivo"), "Tardanza reiterada");
        assert_eq!(map.value("dias_suspension"), "2");
        assert_eq!(map.value("fecha_reincorporacion"), "15 de octubre de 2026");
    }

    #[test]
    fn test_extra_fields_override_vocabulary() {
        let mut extra = BTreeMap::new();
        extra.insert("motivo".to_string(), "Ausencia injustificada".to_string());
        extra.insert("lugar".to_string(), "Rosario".to_string());
        let map = ReplacementMap::from_context(&context().with_extra_fields(extra));

        assert_eq!(map.value("motivo"), "Ausencia injustificada");
        assert_eq!(map.value("lugar"), "Rosario");
    }
}
