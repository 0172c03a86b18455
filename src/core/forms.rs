use crate::domain::model::{DocumentKind, FieldType, FormData, LineItem};
use serde_json::{Map, Number, Value};

pub const SERVICE_FIELD: &str = "servico";
pub const VALUE_FIELD: &str = "valor";
pub const ITEMS_KEY: &str = "itens";
pub const QUERY_SERVICES_KEY: &str = "servicos";
pub const QUERY_VALUES_KEY: &str = "valores";

/// Document data shaped from one form submission.
#[derive(Debug, Clone, PartialEq)]
pub struct DocumentRequest {
    pub kind: DocumentKind,
    pub fields: Map<String, Value>,
    pub itens: Vec<LineItem>,
}

impl DocumentRequest {
    pub fn from_form(kind: DocumentKind, form: &FormData) -> Self {
        let itens = if kind.is_itemized() {
            line_items(form)
        } else {
            Vec::new()
        };

        let mut fields = Map::new();
        for (name, field_type) in kind.fields() {
            let Some(raw) = form.get(name) else {
                continue;
            };
            let value = match field_type {
                FieldType::Text => Value::String(raw.to_string()),
                FieldType::Number => number_value(parse_amount(raw)),
            };
            fields.insert(name.to_string(), value);
        }

        // Anything else the user filled in travels as text.
        for (name, value) in form.iter() {
            if fields.contains_key(name) || is_item_field(kind, name) {
                continue;
            }
            fields.insert(name.to_string(), Value::String(value.to_string()));
        }

        Self { kind, fields, itens }
    }

    /// JSON body: the scalar fields plus `itens` for itemized kinds.
    pub fn to_json(&self) -> Value {
        let mut body = self.fields.clone();
        if self.kind.is_itemized() {
            let itens = self
                .itens
                .iter()
                .map(|item| {
                    let mut obj = Map::new();
                    obj.insert("descricao".to_string(), Value::String(item.descricao.clone()));
                    obj.insert("valor".to_string(), number_value(item.valor));
                    Value::Object(obj)
                })
                .collect();
            body.insert(ITEMS_KEY.to_string(), Value::Array(itens));
        }
        Value::Object(body)
    }

    /// Query pairs: scalar fields, then items as repeated `servicos`/`valores`.
    pub fn to_query(&self) -> Vec<(String, String)> {
        let mut pairs: Vec<(String, String)> = self
            .fields
            .iter()
            .map(|(name, value)| (name.clone(), query_value(value)))
            .collect();

        for item in &self.itens {
            pairs.push((QUERY_SERVICES_KEY.to_string(), item.descricao.clone()));
        }
        for item in &self.itens {
            pairs.push((QUERY_VALUES_KEY.to_string(), item.valor.to_string()));
        }
        pairs
    }
}

/// Pairs the i-th `servico` with the i-th `valor`. One item per service;
/// a missing or unparsable value counts as zero.
pub fn line_items(form: &FormData) -> Vec<LineItem> {
    let values = form.get_all(VALUE_FIELD);
    form.get_all(SERVICE_FIELD)
        .into_iter()
        .enumerate()
        .map(|(i, descricao)| LineItem {
            descricao: descricao.to_string(),
            valor: values.get(i).map(|v| parse_amount(v)).unwrap_or(0.0),
        })
        .collect()
}

/// Lenient number parsing: accepts `199.90` and `199,90`; anything else is 0.
pub fn parse_amount(raw: &str) -> f64 {
    let trimmed = raw.trim();
    trimmed
        .parse::<f64>()
        .or_else(|_| trimmed.replace(',', ".").parse::<f64>())
        .ok()
        .filter(|v| v.is_finite())
        .unwrap_or(0.0)
}

fn is_item_field(kind: DocumentKind, name: &str) -> bool {
    kind.is_itemized() && (name == SERVICE_FIELD || name == VALUE_FIELD)
}

fn number_value(value: f64) -> Value {
    Number::from_f64(value)
        .map(Value::Number)
        .unwrap_or_else(|| Value::Number(Number::from(0)))
}

fn query_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_line_items_zip_by_position() {
        let form = FormData::from_pairs([
            ("cliente", "Maria"),
            ("servico", "Troca de tela"),
            ("valor", "199,90"),
            ("servico", "Limpeza"),
            ("valor", "abc"),
            ("servico", "Bateria"),
        ]);

        let items = line_items(&form);

        assert_eq!(items.len(), 3);
        assert_eq!(items[0].descricao, "Troca de tela");
        assert_eq!(items[0].valor, 199.9);
        assert_eq!(items[1].descricao, "Limpeza");
        assert_eq!(items[1].valor, 0.0);
        assert_eq!(items[2].descricao, "Bateria");
        assert_eq!(items[2].valor, 0.0);
    }

    #[test]
    fn test_extra_values_without_service_are_ignored() {
        let form = FormData::from_pairs([("servico", "A"), ("valor", "1"), ("valor", "2")]);
        assert_eq!(line_items(&form).len(), 1);
    }

    #[test]
    fn test_parse_amount() {
        assert_eq!(parse_amount("100"), 100.0);
        assert_eq!(parse_amount(" 12.5 "), 12.5);
        assert_eq!(parse_amount("12,5"), 12.5);
        assert_eq!(parse_amount(""), 0.0);
        assert_eq!(parse_amount("NaN"), 0.0);
        assert_eq!(parse_amount("1.234,56"), 0.0);
    }

    #[test]
    fn test_orcamento_json_body() {
        let form = FormData::from_pairs([
            ("cliente", "João da Silva"),
            ("servico", "Troca de Tela"),
            ("valor", "199.90"),
        ]);

        let body = DocumentRequest::from_form(DocumentKind::Orcamento, &form).to_json();

        assert_eq!(
            body,
            json!({
                "cliente": "João da Silva",
                "itens": [{"descricao": "Troca de Tela", "valor": 199.9}]
            })
        );
    }

    #[test]
    fn test_recibo_valor_is_numeric_scalar() {
        let form = FormData::from_pairs([("cliente", "Ana"), ("valor", "100,50")]);

        let request = DocumentRequest::from_form(DocumentKind::Recibo, &form);

        assert!(request.itens.is_empty());
        assert_eq!(
            request.to_json(),
            json!({"cliente": "Ana", "valor": 100.5})
        );
    }

    #[test]
    fn test_itemized_kind_without_items_sends_empty_array() {
        let form = FormData::from_pairs([("numero", "1"), ("cliente", "Ana")]);
        let body = DocumentRequest::from_form(DocumentKind::NotaFiscal, &form).to_json();
        assert_eq!(body["itens"], json!([]));
    }

    #[test]
    fn test_unknown_fields_pass_through_as_text() {
        let form = FormData::from_pairs([("nome", "Ana"), ("curso", "Rust"), ("turma", "B")]);
        let body = DocumentRequest::from_form(DocumentKind::Certificado, &form).to_json();
        assert_eq!(body, json!({"nome": "Ana", "curso": "Rust", "turma": "B"}));
    }

    #[test]
    fn test_nota_fiscal_query_pairs() {
        let form = FormData::from_pairs([
            ("numero", "0042"),
            ("cliente", "Ana"),
            ("servico", "A"),
            ("valor", "10"),
            ("servico", "B"),
            ("valor", "2.5"),
        ]);

        let pairs = DocumentRequest::from_form(DocumentKind::NotaFiscal, &form).to_query();

        let get_all = |key: &str| -> Vec<&str> {
            pairs
                .iter()
                .filter(|(k, _)| k == key)
                .map(|(_, v)| v.as_str())
                .collect()
        };
        assert_eq!(get_all("numero"), vec!["0042"]);
        assert_eq!(get_all("servicos"), vec!["A", "B"]);
        assert_eq!(get_all("valores"), vec!["10", "2.5"]);
        assert!(get_all("servico").is_empty());
    }
}
