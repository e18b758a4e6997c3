//! Directory side of a run: which organization members are missing from a
//! people page, by name.

use roster_directory::{
    identifier_text, reconcile, DirectoryClient, DirectoryError, DirectoryFetcher,
    OrganizationQuery, Result, ID_FIELD,
};
use serde_json::Value;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MissingMembers {
    pub organization_id: String,
    /// Members that are also listed on the page.
    pub listed: usize,
    /// Full names of members absent from the page, in directory order.
    pub names: Vec<String>,
}

fn person_id(value: &Value) -> Result<i64> {
    if let Some(id) = value.as_i64() {
        return Ok(id);
    }
    let text = identifier_text(value);
    text.trim()
        .parse()
        .map_err(|_| DirectoryError::MalformedResponse {
            reason: format!("member {ID_FIELD} '{text}' is not numeric"),
        })
}

/// Resolve the organization, reconcile its members against `page_ids` and
/// look up the name of every member the page does not list.
pub async fn find_missing_members<F: DirectoryFetcher>(
    client: &DirectoryClient<F>,
    query: &OrganizationQuery,
    page_ids: &[String],
) -> Result<MissingMembers> {
    let organization_id = client.resolve_organization(query).await?;
    let members = client.all_organization_members(&organization_id).await?;
    let reconciliation = reconcile(ID_FIELD, &members, page_ids);

    tracing::info!(
        organization_id = %organization_id,
        listed = reconciliation.matching.len(),
        missing = reconciliation.different.len(),
        "Compared organization members to people page"
    );

    let mut names = Vec::with_capacity(reconciliation.different.len());
    for value in &reconciliation.different {
        names.push(client.person_name(person_id(value)?).await?);
    }

    Ok(MissingMembers {
        organization_id,
        listed: reconciliation.matching.len(),
        names,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use roster_directory::{ApiConfiguration, ErrorKind};
    use serde_json::json;
    use std::collections::BTreeMap;
    use std::sync::Mutex;

    /// Directory of people sorted by id, three per page, with one
    /// organization whose members are served on a single page.
    struct FakeDirectory {
        people: Vec<Value>,
        organization: (i64, &'static str),
        members: Vec<i64>,
        requests: Mutex<u32>,
    }

    impl FakeDirectory {
        const PAGE_SIZE: usize = 3;

        fn new() -> Self {
            let people = [
                (1001, "Aino Aalto"),
                (1012, "Jim Beam"),
                (1013, "Maria Valaste"),
                (1014, "Eero Saarinen"),
                (1015, "Tove Jansson"),
                (1117, "Minna Canth"),
                (2107, "Jean Sibelius"),
            ]
            .into_iter()
            .map(|(id, name)| json!({"id": id, "fullname": name}))
            .collect();

            Self {
                people,
                organization: (62_060_775, "Centre for Social Data Science"),
                members: vec![1012, 1015, 1117],
                requests: Mutex::new(0),
            }
        }

        fn last_page(&self) -> usize {
            self.people.len().div_ceil(Self::PAGE_SIZE)
        }

        fn page_document(&self, members: Vec<Value>, page: usize, last: usize) -> Value {
            json!({
                "hydra:member": members,
                "hydra:view": {
                    "@id": format!("/contacts?page={page}"),
                    "hydra:first": "/contacts?page=1",
                    "hydra:last": format!("/contacts?page={last}"),
                }
            })
        }

        fn organization_ref(&self) -> Value {
            json!({
                "id": self.organization.0,
                "name": {"en": self.organization.1, "fi": "Yhteiskunnallisen datatieteen keskus"}
            })
        }
    }

    #[async_trait]
    impl DirectoryFetcher for FakeDirectory {
        async fn fetch(
            &self,
            _endpoint: &str,
            _headers: &BTreeMap<String, String>,
            params: &BTreeMap<String, String>,
        ) -> Result<Value> {
            *self.requests.lock().expect("lock") += 1;

            if let Some(org) = params.get("researchOrganizations.id[]") {
                let members = if org == &self.organization.0.to_string() {
                    self.people
                        .iter()
                        .filter(|p| self.members.contains(&p["id"].as_i64().unwrap_or_default()))
                        .cloned()
                        .collect()
                } else {
                    Vec::new()
                };
                return Ok(self.page_document(members, 1, 1));
            }

            if params.contains_key("search") || params.contains_key("fullname") {
                let member = json!({
                    "id": 1012,
                    "fullname": "Jim Beam",
                    "researchOrganizations": [self.organization_ref()]
                });
                return Ok(self.page_document(vec![member], 1, 1));
            }

            let page: usize = params
                .get("page")
                .and_then(|p| p.parse().ok())
                .unwrap_or(1);
            let members = self
                .people
                .chunks(Self::PAGE_SIZE)
                .nth(page - 1)
                .map(<[Value]>::to_vec)
                .unwrap_or_default();
            Ok(self.page_document(members, page, self.last_page()))
        }
    }

    fn client() -> DirectoryClient<FakeDirectory> {
        DirectoryClient::new(
            FakeDirectory::new(),
            ApiConfiguration::new("https://directory.test/contacts"),
        )
    }

    fn ids(values: &[&str]) -> Vec<String> {
        values.iter().map(ToString::to_string).collect()
    }

    #[tokio::test]
    async fn test_missing_members_by_organization_id() {
        let client = client();
        let result = find_missing_members(
            &client,
            &OrganizationQuery::ById("62060775".to_string()),
            &ids(&["1015", "9999"]),
        )
        .await
        .expect("run succeeds");

        assert_eq!(result.organization_id, "62060775");
        assert_eq!(result.listed, 1);
        assert_eq!(result.names, vec!["Jim Beam", "Minna Canth"]);
    }

    #[tokio::test]
    async fn test_missing_members_by_organization_name() {
        let client = client();
        let result = find_missing_members(
            &client,
            &OrganizationQuery::ByName("Centre for Social Data Science".to_string()),
            &ids(&["1012", "1015", "1117"]),
        )
        .await
        .expect("run succeeds");

        assert_eq!(result.organization_id, "62060775");
        assert_eq!(result.listed, 3);
        assert!(result.names.is_empty());
    }

    #[tokio::test]
    async fn test_missing_members_by_person() {
        let client = client();
        let result = find_missing_members(
            &client,
            &OrganizationQuery::ByPerson("Jim Beam".to_string()),
            &ids(&["1012"]),
        )
        .await
        .expect("run succeeds");

        assert_eq!(result.organization_id, "62060775");
        assert_eq!(result.names, vec!["Tove Jansson", "Minna Canth"]);
    }

    #[tokio::test]
    async fn test_unknown_organization_name() {
        let client = client();
        let err = find_missing_members(
            &client,
            &OrganizationQuery::ByName("Centre for Something Else".to_string()),
            &[],
        )
        .await
        .expect_err("no such organization");

        assert_eq!(err.kind(), ErrorKind::NotFound);
    }

    #[test]
    fn test_person_id_accepts_numeric_text() {
        assert_eq!(person_id(&json!(1117)).expect("number"), 1117);
        assert_eq!(person_id(&json!("1117")).expect("numeric text"), 1117);
        assert!(person_id(&Value::Null).is_err());
    }
}
