//! Hard-coded renderers used when no dynamic template applies.
//!
//! One drawing routine per document type, plus a minimal renderer for
//! templates that render to nothing usable. All of them read the same
//! replacement bag the templates use.

use super::html::Align;
use super::pdf::{PdfCanvas, TextStyle};
use super::placeholders::ReplacementMap;
use super::{DocumentError, DocumentType};

/// Render the built-in layout for `tipo`.
pub fn render_builtin(tipo: DocumentType, map: &ReplacementMap) -> Result<Vec<u8>, DocumentError> {
    let mut canvas = PdfCanvas::new(tipo.title())?;

    match tipo {
        DocumentType::Amonestacion => amonestacion(&mut canvas, map),
        DocumentType::Suspension => suspension(&mut canvas, map),
        DocumentType::Vacaciones => vacaciones(&mut canvas, map),
        DocumentType::Capacitacion => capacitacion(&mut canvas, map),
        DocumentType::ConstanciaTrabajo => constancia_trabajo(&mut canvas, map),
    }

    canvas.finish()
}

/// Bare document: title, employee, company and date.
pub fn render_minimal(tipo: DocumentType, map: &ReplacementMap) -> Result<Vec<u8>, DocumentError> {
    let mut canvas = PdfCanvas::new(tipo.title())?;

    canvas.text(tipo.title(), TextStyle::title());
    canvas.space(8.0);
    canvas.text(
        &labeled("Empleado", map.value("empleado_nombre_completo")),
        TextStyle::body(),
    );
    if map.is_filled("empleado_dni") {
        canvas.text(&labeled("DNI", map.value("empleado_dni")), TextStyle::body());
    }
    canvas.text(&labeled("Empresa", map.value("empresa_nombre")), TextStyle::body());
    canvas.text(&labeled("Fecha", map.value("fecha_actual")), TextStyle::body());

    canvas.finish()
}

fn letterhead(canvas: &mut PdfCanvas, map: &ReplacementMap) {
    canvas.text(map.value("empresa_nombre"), TextStyle::body().sized(14.0).bold());
    let small = TextStyle::body().sized(9.0);
    if map.is_filled("empresa_cuit") {
        canvas.text(&labeled("CUIT", map.value("empresa_cuit")), small);
    }
    if map.is_filled("empresa_direccion") {
        canvas.text(map.value("empresa_direccion"), small);
    }
    let contact = join_filled(&[map.value("empresa_telefono"), map.value("empresa_email")], " - ");
    if !contact.is_empty() {
        canvas.text(&contact, small);
    }
    canvas.space(6.0);
    canvas.text(map.value("fecha_actual"), TextStyle::body().aligned(Align::Right));
    canvas.space(6.0);
}

fn addressee(canvas: &mut PdfCanvas, map: &ReplacementMap) {
    canvas.text(
        &format!("Sr./Sra. {}", map.value("empleado_nombre_completo")),
        TextStyle::body().bold(),
    );
    let details = join_filled(
        &[
            prefixed("DNI ", map.value("empleado_dni")).as_str(),
            prefixed("Legajo ", map.value("empleado_legajo")).as_str(),
            map.value("empleado_puesto"),
        ],
        " - ",
    );
    if !details.is_empty() {
        canvas.text(&details, TextStyle::body());
    }
    canvas.space(4.0);
    canvas.text("De nuestra consideración:", TextStyle::body());
    canvas.space(3.0);
}

fn title(canvas: &mut PdfCanvas, tipo: DocumentType) {
    canvas.text(tipo.title(), TextStyle::title().sized(14.0));
    canvas.space(6.0);
}

fn notification_signatures(canvas: &mut PdfCanvas, map: &ReplacementMap) {
    canvas.space(6.0);
    canvas.text("Sin otro particular, saludamos a usted atentamente.", TextStyle::body());
    let employer = if map.is_filled("empresa_representante") {
        format!("{} - {}", map.value("empresa_representante"), map.value("empresa_nombre"))
    } else {
        map.value("empresa_nombre").to_string()
    };
    canvas.signature(&employer, Align::Left);
    canvas.signature(
        &format!("Notificado: {}", map.value("empleado_nombre_completo")),
        Align::Left,
    );
}

fn sanction_reason(canvas: &mut PdfCanvas, map: &ReplacementMap) {
    if map.is_filled("motivo") {
        canvas.space(2.0);
        canvas.text(&labeled("Motivo", map.value("motivo")), TextStyle::body());
    }
    if map.is_filled("descripcion") {
        canvas.space(2.0);
        canvas.text(&labeled("Detalle", map.value("descripcion")), TextStyle::body());
    }
}

fn amonestacion(canvas: &mut PdfCanvas, map: &ReplacementMap) {
    letterhead(canvas, map);
    title(canvas, DocumentType::Amonestacion);
    addressee(canvas, map);

    let mut body = String::from(
        "Por medio de la presente se le notifica formalmente que se ha resuelto aplicarle un apercibimiento",
    );
    if map.is_filled("fecha_sancion") {
        body.push_str(&format!(" con fecha {}", map.value("fecha_sancion")));
    }
    body.push('.');
    canvas.text(&body, TextStyle::body());
    sanction_reason(canvas, map);

    canvas.space(3.0);
    canvas.text(
        "Se le hace saber que la reiteración de conductas de esta naturaleza podrá dar lugar a sanciones más severas.",
        TextStyle::body(),
    );
    notification_signatures(canvas, map);
}

fn suspension(canvas: &mut PdfCanvas, map: &ReplacementMap) {
    letterhead(canvas, map);
    title(canvas, DocumentType::Suspension);
    addressee(canvas, map);

    let mut body = String::from(
        "Por medio de la presente se le notifica que se ha resuelto aplicarle una suspensión",
    );
    if map.is_filled("dias_suspension") {
        body.push_str(&format!(" de {} día(s)", map.value("dias_suspension")));
    }
    body.push_str(" sin goce de haberes");
    if map.is_filled("fecha_inicio_suspension") && map.is_filled("fecha_fin_suspension") {
        body.push_str(&format!(
            ", desde el {} hasta el {} inclusive",
            map.value("fecha_inicio_suspension"),
            map.value("fecha_fin_suspension")
        ));
    }
    body.push('.');
    canvas.text(&body, TextStyle::body());
    sanction_reason(canvas, map);

    if map.is_filled("fecha_reincorporacion") {
        canvas.space(3.0);
        canvas.text(
            &format!(
                "Deberá reintegrarse a sus tareas habituales el día {}.",
                map.value("fecha_reincorporacion")
            ),
            TextStyle::body(),
        );
    }
    notification_signatures(canvas, map);
}

fn vacaciones(canvas: &mut PdfCanvas, map: &ReplacementMap) {
    letterhead(canvas, map);
    title(canvas, DocumentType::Vacaciones);
    addressee(canvas, map);

    let mut body = format!(
        "Por la presente le notificamos que se le otorgan {} día(s) de vacaciones",
        map.value("dias_vacaciones")
    );
    if map.is_filled("periodo_vacaciones") {
        body.push_str(&format!(
            " correspondientes al período {}",
            map.value("periodo_vacaciones")
        ));
    }
    body.push_str(&format!(
        ", a gozar desde el {} hasta el {} inclusive.",
        map.value("fecha_inicio_vacaciones"),
        map.value("fecha_fin_vacaciones")
    ));
    canvas.text(&body, TextStyle::body());

    if map.is_filled("fecha_reincorporacion_vacaciones") {
        canvas.space(3.0);
        canvas.text(
            &format!(
                "Deberá reintegrarse a sus tareas el día {}.",
                map.value("fecha_reincorporacion_vacaciones")
            ),
            TextStyle::body(),
        );
    }
    notification_signatures(canvas, map);
}

fn capacitacion(canvas: &mut PdfCanvas, map: &ReplacementMap) {
    let centered = TextStyle::body().aligned(Align::Center);

    canvas.text(map.value("empresa_nombre"), centered.sized(13.0).bold());
    canvas.space(14.0);
    canvas.text(DocumentType::Capacitacion.title(), TextStyle::title().sized(20.0));
    canvas.space(12.0);
    canvas.text("Se certifica que", centered);
    canvas.space(4.0);
    canvas.text(map.value("empleado_nombre_completo"), centered.sized(16.0).bold());
    if map.is_filled("empleado_dni") {
        canvas.text(&prefixed("DNI ", map.value("empleado_dni")), centered);
    }
    canvas.space(4.0);
    canvas.text("ha completado satisfactoriamente la capacitación", centered);
    canvas.space(2.0);
    canvas.text(map.value("capacitacion_nombre"), centered.sized(14.0).bold());
    canvas.space(4.0);

    let details = join_filled(
        &[
            prefixed("dictada por ", map.value("capacitacion_institucion")).as_str(),
            wrapped("con una duración de ", map.value("capacitacion_horas"), " horas").as_str(),
            prefixed("realizada el ", map.value("capacitacion_fecha")).as_str(),
        ],
        ", ",
    );
    if !details.is_empty() {
        canvas.text(&details, centered);
    }
    canvas.space(6.0);
    canvas.text(map.value("fecha_actual"), centered);

    if map.is_filled("capacitacion_instructor") {
        canvas.signature(
            &format!("Instructor: {}", map.value("capacitacion_instructor")),
            Align::Center,
        );
    }
    let representante = if map.is_filled("empresa_representante") {
        map.value("empresa_representante")
    } else {
        map.value("empresa_nombre")
    };
    canvas.signature(representante, Align::Center);
}

fn constancia_trabajo(canvas: &mut PdfCanvas, map: &ReplacementMap) {
    letterhead(canvas, map);
    title(canvas, DocumentType::ConstanciaTrabajo);
    canvas.text("A quien corresponda:", TextStyle::body());
    canvas.space(4.0);

    let mut body = format!(
        "Por medio de la presente se deja constancia de que {}",
        map.value("empleado_nombre_completo")
    );
    let ids = join_filled(
        &[
            prefixed("DNI ", map.value("empleado_dni")).as_str(),
            prefixed("CUIL ", map.value("empleado_cuil")).as_str(),
        ],
        ", ",
    );
    if !ids.is_empty() {
        body.push_str(&format!(", {},", ids));
    }
    body.push_str(&format!(" se desempeña en {}", map.value("empresa_nombre")));
    if map.is_filled("empleado_fecha_ingreso") {
        body.push_str(&format!(" desde el {}", map.value("empleado_fecha_ingreso")));
    }
    if map.is_filled("empleado_puesto") {
        body.push_str(&format!(", en el puesto de {}", map.value("empleado_puesto")));
    }
    if map.is_filled("empleado_departamento") {
        body.push_str(&format!(", área {}", map.value("empleado_departamento")));
    }
    body.push('.');
    canvas.text(&body, TextStyle::body());

    canvas.space(3.0);
    canvas.text(
        &format!(
            "Se extiende la presente a pedido de la persona interesada para ser presentada ante quien corresponda, el {}.",
            map.value("fecha_actual")
        ),
        TextStyle::body(),
    );

    let representante = if map.is_filled("empresa_representante") {
        format!("{} - {}", map.value("empresa_representante"), map.value("empresa_nombre"))
    } else {
        map.value("empresa_nombre").to_string()
    };
    canvas.signature(&representante, Align::Right);
}

fn labeled(label: &str, value: &str) -> String {
    format!("{}: {}", label, value)
}

fn prefixed(prefix: &str, value: &str) -> String {
    wrapped(prefix, value, "")
}

/// `prefix + value + suffix`, or empty when the value is blank.
fn wrapped(prefix: &str, value: &str, suffix: &str) -> String {
    if value.trim().is_empty() {
        String::new()
    } else {
        format!("{}{}{}", prefix, value.trim(), suffix)
    }
}

fn join_filled(parts: &[&str], separator: &str) -> String {
    parts
        .iter()
        .map(|part| part.trim())
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(separator)
}
