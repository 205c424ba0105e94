//! 지표 결과 테이블.

use confidence_core::{CoreError, CoreResult, DateIndex, MetricResult};

/// 테이블의 열 하나.
#[derive(Debug, Clone)]
pub struct MetricColumn {
    pub name: String,
    pub description: String,
    pub result: MetricResult,
}

/// 등록 순서를 유지하는 지표 이름 → 결과 매핑.
///
/// 모든 열은 같은 날짜 인덱스를 공유하며 이름은 유일합니다.
#[derive(Debug, Clone)]
pub struct MetricTable {
    index: DateIndex,
    columns: Vec<MetricColumn>,
}

impl MetricTable {
    pub fn new(index: DateIndex) -> Self {
        Self {
            index,
            columns: Vec::new(),
        }
    }

    /// 열을 추가합니다.
    ///
    /// # Errors
    ///
    /// - `CoreError::DuplicateMetric`: 같은 이름의 열이 이미 있음
    /// - `CoreError::Misaligned`: 결과가 테이블 인덱스와 다름
    pub fn insert(
        &mut self,
        name: impl Into<String>,
        description: impl Into<String>,
        result: MetricResult,
    ) -> CoreResult<()> {
        let name = name.into();

        if self.get(&name).is_some() {
            return Err(CoreError::DuplicateMetric(name));
        }
        if !result.is_aligned_with(&self.index) {
            return Err(CoreError::Misaligned {
                expected: self.index.len(),
                actual: result.len(),
            });
        }

        self.columns.push(MetricColumn {
            name,
            description: description.into(),
            result,
        });
        Ok(())
    }

    pub fn index(&self) -> &DateIndex {
        &self.index
    }

    pub fn columns(&self) -> &[MetricColumn] {
        &self.columns
    }

    pub fn get(&self, name: &str) -> Option<&MetricColumn> {
        self.columns.iter().find(|c| c.name == name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.columns.iter().map(|c| c.name.as_str())
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use confidence_core::Series;

    fn index(len: u32) -> DateIndex {
        DateIndex::new(
            (1..=len)
                .map(|d| NaiveDate::from_ymd_opt(2024, 2, d).unwrap())
                .collect(),
        )
    }

    #[test]
    fn test_insert_keeps_registration_order() {
        let idx = index(2);
        let mut table = MetricTable::new(idx.clone());
        table.insert("B", "second", Series::missing(idx.clone())).unwrap();
        table.insert("A", "first", Series::missing(idx)).unwrap();

        assert_eq!(table.names().collect::<Vec<_>>(), vec!["B", "A"]);
        assert_eq!(table.get("A").unwrap().description, "first");
    }

    #[test]
    fn test_duplicate_name_is_rejected() {
        let idx = index(2);
        let mut table = MetricTable::new(idx.clone());
        table.insert("PiCycle", "x", Series::missing(idx.clone())).unwrap();

        let err = table.insert("PiCycle", "y", Series::missing(idx)).unwrap_err();
        assert!(matches!(err, CoreError::DuplicateMetric(name) if name == "PiCycle"));
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn test_misaligned_result_is_rejected() {
        let mut table = MetricTable::new(index(3));
        let err = table
            .insert("PiCycle", "x", Series::missing(index(2)))
            .unwrap_err();
        assert!(matches!(
            err,
            CoreError::Misaligned {
                expected: 3,
                actual: 2
            }
        ));
    }
}
