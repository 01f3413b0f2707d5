//! Existing-alarm catalog indexing (Functional Core).
//!
//! The shell collects every alarm record across all result pages, then hands
//! the full set to [`index_namespace_alarms`]. Filtering only after full
//! materialization keeps duplicate detection meaningful: a name seen twice
//! within one namespace listing is an inconsistent remote catalog, not
//! something to resolve by last-write-wins.

use std::collections::HashMap;

use thiserror::Error;

/// One alarm as reported by the monitoring service.
#[derive(Debug, Clone, PartialEq)]
pub struct AlarmRecord {
    pub name: String,
    pub namespace: String,
    pub threshold: f64,
}

/// Errors produced while indexing the alarm catalog.
#[derive(Error, Debug, PartialEq)]
pub enum CatalogError {
    #[error("alarm '{name}' appears more than once in namespace '{namespace}'")]
    DuplicateAlarmName { name: String, namespace: String },
}

/// Projects the collected alarm records down to a name -> threshold map,
/// keeping only records in the given namespace.
pub fn index_namespace_alarms(
    records: &[AlarmRecord],
    namespace: &str,
) -> Result<HashMap<String, f64>, CatalogError> {
    let mut index = HashMap::new();
    for record in records {
        if record.namespace != namespace {
            continue;
        }
        if index.insert(record.name.clone(), record.threshold).is_some() {
            return Err(CatalogError::DuplicateAlarmName {
                name: record.name.clone(),
                namespace: namespace.to_string(),
            });
        }
    }
    Ok(index)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::DYNAMODB_NAMESPACE;

    fn record(name: &str, namespace: &str, threshold: f64) -> AlarmRecord {
        AlarmRecord {
            name: name.to_string(),
            namespace: namespace.to_string(),
            threshold,
        }
    }

    #[test]
    fn test_filters_foreign_namespaces() {
        let records = vec![
            record("Orders-ReadLimit-BasicAlarm", DYNAMODB_NAMESPACE, 24000.0),
            record("cpu-high", "AWS/EC2", 90.0),
        ];

        let index = index_namespace_alarms(&records, DYNAMODB_NAMESPACE).unwrap();

        assert_eq!(index.len(), 1);
        assert_eq!(index["Orders-ReadLimit-BasicAlarm"], 24000.0);
    }

    #[test]
    fn test_pagination_completeness() {
        // Three pages must index identically to the same records in one page.
        let page1 = vec![record("a-ReadLimit-BasicAlarm", DYNAMODB_NAMESPACE, 1.0)];
        let page2 = vec![record("b-ReadLimit-BasicAlarm", DYNAMODB_NAMESPACE, 2.0)];
        let page3 = vec![record("c-ReadLimit-BasicAlarm", DYNAMODB_NAMESPACE, 3.0)];

        let mut paged = Vec::new();
        for page in [&page1, &page2, &page3] {
            paged.extend(page.iter().cloned());
        }
        let single: Vec<AlarmRecord> = paged.clone();

        assert_eq!(
            index_namespace_alarms(&paged, DYNAMODB_NAMESPACE).unwrap(),
            index_namespace_alarms(&single, DYNAMODB_NAMESPACE).unwrap()
        );
        assert_eq!(
            index_namespace_alarms(&paged, DYNAMODB_NAMESPACE).unwrap().len(),
            3
        );
    }

    #[test]
    fn test_duplicate_name_is_integrity_fault() {
        let records = vec![
            record("Orders-ReadLimit-BasicAlarm", DYNAMODB_NAMESPACE, 24000.0),
            record("Orders-ReadLimit-BasicAlarm", DYNAMODB_NAMESPACE, 30000.0),
        ];

        let err = index_namespace_alarms(&records, DYNAMODB_NAMESPACE).unwrap_err();

        assert_eq!(
            err,
            CatalogError::DuplicateAlarmName {
                name: "Orders-ReadLimit-BasicAlarm".to_string(),
                namespace: DYNAMODB_NAMESPACE.to_string(),
            }
        );
    }

    #[test]
    fn test_duplicate_outside_namespace_is_ignored() {
        // Duplicates only matter within the namespace we manage.
        let records = vec![
            record("cpu-high", "AWS/EC2", 90.0),
            record("cpu-high", "AWS/EC2", 95.0),
        ];

        let index = index_namespace_alarms(&records, DYNAMODB_NAMESPACE).unwrap();
        assert!(index.is_empty());
    }
}
