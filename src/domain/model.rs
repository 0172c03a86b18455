use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

/// A described amount on an itemized document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineItem {
    pub descricao: String,
    pub valor: f64,
}

/// Named form values in submission order. Names may repeat.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormData {
    entries: Vec<(String, String)>,
}

impl FormData {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            entries: pairs
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }

    pub fn append(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.entries.push((name.into(), value.into()));
    }

    /// First value submitted under `name`.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }

    pub fn get_all(&self, name: &str) -> Vec<&str> {
        self.entries
            .iter()
            .filter(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
            .collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// How a document request travels to the API.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
pub enum PayloadStyle {
    /// `POST` with a JSON body.
    #[default]
    Json,
    /// `GET` with query parameters, items as repeated `servicos`/`valores`.
    Query,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldType {
    Text,
    Number,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
pub enum DocumentKind {
    Orcamento,
    NotaFiscal,
    Contrato,
    Recibo,
    Carta,
    Certificado,
}

impl DocumentKind {
    pub const ALL: [DocumentKind; 6] = [
        DocumentKind::Orcamento,
        DocumentKind::NotaFiscal,
        DocumentKind::Contrato,
        DocumentKind::Recibo,
        DocumentKind::Carta,
        DocumentKind::Certificado,
    ];

    pub fn endpoint(&self, style: PayloadStyle) -> &'static str {
        match (self, style) {
            (DocumentKind::Orcamento, PayloadStyle::Json) => "/orcamento",
            (DocumentKind::Orcamento, PayloadStyle::Query) => "/gerar-pdf",
            (DocumentKind::NotaFiscal, _) => "/nota-fiscal",
            (DocumentKind::Contrato, _) => "/contrato",
            (DocumentKind::Recibo, _) => "/recibo",
            (DocumentKind::Carta, _) => "/carta",
            (DocumentKind::Certificado, _) => "/certificado",
        }
    }

    /// Scalar fields the document service knows for this kind.
    pub fn fields(&self) -> &'static [(&'static str, FieldType)] {
        match self {
            DocumentKind::Orcamento => &[("cliente", FieldType::Text)],
            DocumentKind::NotaFiscal => &[
                ("numero", FieldType::Text),
                ("cliente", FieldType::Text),
                ("data", FieldType::Text),
            ],
            DocumentKind::Contrato => &[
                ("cliente", FieldType::Text),
                ("descricao", FieldType::Text),
            ],
            DocumentKind::Recibo => &[("cliente", FieldType::Text), ("valor", FieldType::Number)],
            DocumentKind::Carta => &[
                ("destinatario", FieldType::Text),
                ("mensagem", FieldType::Text),
            ],
            DocumentKind::Certificado => &[("nome", FieldType::Text), ("curso", FieldType::Text)],
        }
    }

    pub fn is_itemized(&self) -> bool {
        matches!(self, DocumentKind::Orcamento | DocumentKind::NotaFiscal)
    }

    pub fn default_filename(&self) -> &'static str {
        match self {
            DocumentKind::Orcamento => "orcamento.pdf",
            DocumentKind::NotaFiscal => "nota_fiscal.pdf",
            DocumentKind::Contrato => "contrato.pdf",
            DocumentKind::Recibo => "recibo.pdf",
            DocumentKind::Carta => "carta.pdf",
            DocumentKind::Certificado => "certificado.pdf",
        }
    }

    /// Filename offered to the saver when the response names none.
    pub fn suggested_filename(&self, form: &FormData) -> String {
        match self {
            DocumentKind::NotaFiscal => match form.get("numero").map(str::trim) {
                Some(numero) if !numero.is_empty() => format!("nota_{}.pdf", numero),
                _ => self.default_filename().to_string(),
            },
            _ => self.default_filename().to_string(),
        }
    }
}

impl fmt::Display for DocumentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            DocumentKind::Orcamento => "orcamento",
            DocumentKind::NotaFiscal => "nota-fiscal",
            DocumentKind::Contrato => "contrato",
            DocumentKind::Recibo => "recibo",
            DocumentKind::Carta => "carta",
            DocumentKind::Certificado => "certificado",
        };
        f.write_str(name)
    }
}

/// Outcome of a completed save action.
#[derive(Debug, Clone, Serialize)]
pub struct SavedFile {
    pub path: PathBuf,
    pub filename: String,
    pub size_bytes: usize,
    pub saved_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_form_data_keeps_repeated_fields_in_order() {
        let mut form = FormData::new();
        form.append("cliente", "Maria");
        form.append("servico", "Troca de tela");
        form.append("servico", "Limpeza");

        assert_eq!(form.get("cliente"), Some("Maria"));
        assert_eq!(form.get("servico"), Some("Troca de tela"));
        assert_eq!(form.get_all("servico"), vec!["Troca de tela", "Limpeza"]);
        assert!(form.get_all("valor").is_empty());
        assert_eq!(form.len(), 3);
    }

    #[test]
    fn test_endpoints_per_style() {
        assert_eq!(DocumentKind::Orcamento.endpoint(PayloadStyle::Json), "/orcamento");
        assert_eq!(DocumentKind::Orcamento.endpoint(PayloadStyle::Query), "/gerar-pdf");
        for kind in DocumentKind::ALL {
            assert!(kind.endpoint(PayloadStyle::Json).starts_with('/'));
            assert!(!kind.endpoint(PayloadStyle::Json).ends_with('/'));
        }
    }

    #[test]
    fn test_nota_fiscal_filename_uses_numero() {
        let form = FormData::from_pairs([("numero", "0042")]);
        assert_eq!(DocumentKind::NotaFiscal.suggested_filename(&form), "nota_0042.pdf");

        let blank = FormData::from_pairs([("numero", "  ")]);
        assert_eq!(
            DocumentKind::NotaFiscal.suggested_filename(&blank),
            "nota_fiscal.pdf"
        );
        assert_eq!(
            DocumentKind::Recibo.suggested_filename(&FormData::new()),
            "recibo.pdf"
        );
    }
}
