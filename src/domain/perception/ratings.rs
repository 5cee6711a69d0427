//! Perception Context - 用户评分及其序列化

use serde::{Deserialize, Serialize};

use super::{OptionSchema, PerceptionError, SCALE_POINTS};

/// 用户对当前样本的评分
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Ratings {
    /// 量表: (选项名, 0 起始的刻度位置)
    Scale(Vec<(String, usize)>),
    /// 复选框: 勾选的选项名
    Checked(Vec<String>),
}

impl Ratings {
    pub fn scale<I, S>(selections: I) -> Self
    where
        I: IntoIterator<Item = (S, usize)>,
        S: Into<String>,
    {
        Self::Scale(
            selections
                .into_iter()
                .map(|(item, position)| (item.into(), position))
                .collect(),
        )
    }

    pub fn checked<I, S>(items: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::Checked(items.into_iter().map(Into::into).collect())
    }

    /// 按选项结构校验评分是否完整
    ///
    /// - 量表: 每一项都必须有且只有合法的刻度；没有选项时无法提交
    /// - 复选框: 至少勾选一项
    pub fn validate(&self, schema: &OptionSchema) -> Result<(), PerceptionError> {
        match (self, schema) {
            (Self::Scale(selections), OptionSchema::Scale { items }) => {
                if items.is_empty() {
                    return Err(PerceptionError::NothingChecked);
                }
                for (idx, (item, position)) in selections.iter().enumerate() {
                    if !schema.contains(item) {
                        return Err(PerceptionError::UnknownOption(item.clone()));
                    }
                    if selections[..idx].iter().any(|(name, _)| name == item) {
                        return Err(PerceptionError::DuplicateRating(item.clone()));
                    }
                    if *position >= SCALE_POINTS {
                        return Err(PerceptionError::PositionOutOfRange {
                            item: item.clone(),
                            position: *position,
                        });
                    }
                }
                match items
                    .iter()
                    .find(|item| !selections.iter().any(|(name, _)| name == *item))
                {
                    Some(missing) => Err(PerceptionError::MissingRating(missing.clone())),
                    None => Ok(()),
                }
            }
            (Self::Checked(checked), OptionSchema::CheckboxSet { .. }) => {
                if let Some(unknown) = checked.iter().find(|c| !schema.contains(c)) {
                    return Err(PerceptionError::UnknownOption(unknown.clone()));
                }
                if checked.is_empty() {
                    return Err(PerceptionError::NothingChecked);
                }
                Ok(())
            }
            (_, schema) => Err(PerceptionError::SchemaMismatch {
                expected: schema.kind(),
            }),
        }
    }

    /// 序列化为 `RESULTS` 参数，选项顺序跟随选项结构
    ///
    /// - 复选框: `A:C`
    /// - 量表: `x:0;y:4`
    pub fn serialize(&self, schema: &OptionSchema) -> Result<String, PerceptionError> {
        self.validate(schema)?;

        let result = match self {
            Self::Scale(selections) => schema
                .items()
                .iter()
                .filter_map(|item| {
                    selections
                        .iter()
                        .find(|(name, _)| name == item)
                        .map(|(name, position)| format!("{}:{}", name, position))
                })
                .collect::<Vec<_>>()
                .join(";"),
            Self::Checked(checked) => schema
                .items()
                .iter()
                .filter(|item| checked.contains(item))
                .map(String::as_str)
                .collect::<Vec<_>>()
                .join(":"),
        };

        Ok(result)
    }
}
