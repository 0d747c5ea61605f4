use hr_docs_server::documents::substitution::{render_template, unknown_placeholders};
use hr_docs_server::documents::ReplacementMap;

fn bag(pairs: &[(&str, &str)]) -> ReplacementMap {
    pairs.iter().map(|(k, v)| (*k, *v)).collect()
}

const TEMPLATE: &str = "Hola {{empleado_nombre}}, {{#motivo}}Motivo: {{motivo}}{{/motivo}}";

#[test]
fn test_block_kept_when_value_present() {
    let map = bag(&[("empleado_nombre", "Ana"), ("motivo", "Tardanza")]);
    assert_eq!(render_template(TEMPLATE, &map), "Hola Ana, Motivo: Tardanza");
}

#[test]
fn test_block_removed_when_value_absent() {
    let map = bag(&[("empleado_nombre", "Ana")]);
    assert_eq!(render_template(TEMPLATE, &map), "Hola Ana, ");
}

#[test]
fn test_block_removed_when_value_blank() {
    let map = bag(&[("empleado_nombre", "Ana"), ("motivo", "   ")]);
    assert_eq!(render_template(TEMPLATE, &map), "Hola Ana, ");
}

#[test]
fn test_every_occurrence_replaced_and_idempotent() {
    let html = "<p>{{empresa_nombre}}</p><footer>{{empresa_nombre}} - {{anio_actual}}</footer>";
    let map = bag(&[("empresa_nombre", "Metalúrgica Sur SA"), ("anio_actual", "2026")]);

    let once = render_template(html, &map);
    assert_eq!(
        once,
        "<p>Metalúrgica Sur SA</p><footer>Metalúrgica Sur SA - 2026</footer>"
    );
    assert_eq!(render_template(&once, &map), once);
}

#[test]
fn test_unknown_tokens_stay_literal() {
    let html = "Firma: {{firma_gerente}}";
    let map = bag(&[("empleado_nombre", "Ana")]);
    assert_eq!(render_template(html, &map), html);
    assert_eq!(unknown_placeholders(html, &map), vec!["firma_gerente".to_string()]);
}
