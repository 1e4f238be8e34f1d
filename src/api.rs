use crate::{
    data::student::{NewStudentForm, Student, StudentByYear},
    error::{NetworkSnafu, RequestFailedSnafu, RosterResult},
};
use reqwest::Response;
use serde_json::Value;
use snafu::ResultExt;

/// Thin client for the student REST backend.
///
/// Owns no state beyond the connection pool inside `reqwest::Client`,
/// so it is cheap to clone and share. Every operation surfaces
/// transport problems as `Network` and non-2xx statuses as
/// `RequestFailed`; nothing is retried.
#[derive(Clone, Debug)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        let mut base_url = base_url.into();
        while base_url.ends_with('/') {
            base_url.pop();
        }

        Self {
            http: reqwest::Client::new(),
            base_url,
        }
    }

    pub async fn create_student(&self, form: NewStudentForm) -> RosterResult<Student> {
        let payload = form.into_wire()?;
        debug!(?payload, "Creating student");

        let response = self
            .http
            .post(format!("{}/students/save", self.base_url))
            .json(&payload)
            .send()
            .await
            .context(NetworkSnafu)?;

        Self::ensure_success(response)
            .await?
            .json()
            .await
            .context(NetworkSnafu)
    }

    pub async fn all_students(&self) -> RosterResult<Vec<Student>> {
        let response = self
            .http
            .get(format!("{}/students/all", self.base_url))
            .send()
            .await
            .context(NetworkSnafu)?;

        Self::ensure_success(response)
            .await?
            .json()
            .await
            .context(NetworkSnafu)
    }

    pub async fn delete_student(&self, id: i64) -> RosterResult<()> {
        let response = self
            .http
            .delete(format!("{}/students/delete/{id}", self.base_url))
            .send()
            .await
            .context(NetworkSnafu)?;

        Self::ensure_success(response).await.map(|_| ())
    }

    pub async fn student_count(&self) -> RosterResult<u64> {
        let response = self
            .http
            .get(format!("{}/students/count", self.base_url))
            .send()
            .await
            .context(NetworkSnafu)?;

        Self::ensure_success(response)
            .await?
            .json()
            .await
            .context(NetworkSnafu)
    }

    /// Fetch the by-year aggregate, normalising the element shapes the
    /// backend has been known to send. Order is preserved as received;
    /// sorting is the caller's job.
    pub async fn students_by_year(&self) -> RosterResult<Vec<StudentByYear>> {
        let response = self
            .http
            .get(format!("{}/students/byYear", self.base_url))
            .send()
            .await
            .context(NetworkSnafu)?;

        let raw: Value = Self::ensure_success(response)
            .await?
            .json()
            .await
            .context(NetworkSnafu)?;

        // A non-array body decodes to nothing rather than an error,
        // matching how the dashboard has always treated it.
        let Value::Array(elements) = raw else {
            return Ok(Vec::new());
        };

        elements.iter().map(StudentByYear::from_wire).collect()
    }

    async fn ensure_success(response: Response) -> RosterResult<Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        RequestFailedSnafu {
            status: status.as_u16(),
            body,
        }
        .fail()
    }
}
