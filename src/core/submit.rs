use crate::core::dispatcher::{DispatchOutcome, DownloadDispatcher, RequestOptions, Target};
use crate::core::forms::DocumentRequest;
use crate::core::{FileSaver, Notifier};
use crate::domain::model::{DocumentKind, FormData, PayloadStyle};
use reqwest::Method;

/// A fully shaped request, ready to hand to the dispatcher.
#[derive(Debug, Clone)]
pub struct PreparedRequest {
    pub kind: DocumentKind,
    pub target: Target,
    pub options: RequestOptions,
    pub suggested_filename: String,
}

impl PreparedRequest {
    pub fn method(&self) -> &Method {
        &self.options.method
    }
}

/// Submits document forms with one payload style applied to every kind.
pub struct DocumentSubmitter<F: FileSaver, N: Notifier> {
    dispatcher: DownloadDispatcher<F, N>,
    style: PayloadStyle,
}

impl<F: FileSaver, N: Notifier> DocumentSubmitter<F, N> {
    pub fn new(dispatcher: DownloadDispatcher<F, N>, style: PayloadStyle) -> Self {
        Self { dispatcher, style }
    }

    pub fn style(&self) -> PayloadStyle {
        self.style
    }

    pub fn dispatcher(&self) -> &DownloadDispatcher<F, N> {
        &self.dispatcher
    }

    pub fn prepare(&self, kind: DocumentKind, form: &FormData) -> PreparedRequest {
        let request = DocumentRequest::from_form(kind, form);
        let target = Target::Endpoint(kind.endpoint(self.style).to_string());

        let options = match self.style {
            PayloadStyle::Json => RequestOptions::post_json(request.to_json()),
            PayloadStyle::Query => RequestOptions::get().with_query(request.to_query()),
        };

        PreparedRequest {
            kind,
            target,
            options,
            suggested_filename: kind.suggested_filename(form),
        }
    }

    /// Shapes the form, sends it and waits for the save (or the alert).
    pub async fn submit(&self, kind: DocumentKind, form: &FormData) -> DispatchOutcome {
        let prepared = self.prepare(kind, form);
        tracing::info!(
            "📝 Submitting {} ({} fields, {:?} style)",
            kind,
            form.len(),
            self.style
        );

        self.dispatcher
            .dispatch(
                &prepared.target,
                prepared.options,
                &prepared.suggested_filename,
            )
            .await
    }
}
