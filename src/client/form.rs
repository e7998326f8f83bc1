//! 产品表单

use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// 表单草稿，字段保存输入框中的原始文本
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductDraft {
    pub name: String,
    pub price: String,
    pub description: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Name,
    Price,
    Description,
}

impl FromStr for Field {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "name" => Ok(Field::Name),
            "price" => Ok(Field::Price),
            "description" => Ok(Field::Description),
            other => Err(format!("unknown field: {}", other)),
        }
    }
}

#[derive(Debug, Default)]
pub struct ProductForm {
    draft: ProductDraft,
}

impl ProductForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn draft(&self) -> &ProductDraft {
        &self.draft
    }

    /// 只修改对应字段
    pub fn set(&mut self, field: Field, value: impl Into<String>) {
        let value = value.into();
        match field {
            Field::Name => self.draft.name = value,
            Field::Price => self.draft.price = value,
            Field::Description => self.draft.description = value,
        }
    }

    /// 提交表单
    ///
    /// 名称或价格为空时静默忽略，返回 `None` 且草稿保持不变；
    /// 否则返回草稿作为新增事件，并把草稿清空。
    pub fn submit(&mut self) -> Option<ProductDraft> {
        if self.draft.name.is_empty() || self.draft.price.is_empty() {
            return None;
        }
        Some(std::mem::take(&mut self.draft))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_name_does_not_submit() {
        let mut form = ProductForm::new();
        form.set(Field::Price, "9.99");
        assert_eq!(form.submit(), None);
        assert_eq!(form.draft().price, "9.99");
    }

    #[test]
    fn empty_price_does_not_submit() {
        let mut form = ProductForm::new();
        form.set(Field::Name, "Widget");
        form.set(Field::Description, "blue");
        assert_eq!(form.submit(), None);
        assert_eq!(form.draft().name, "Widget");
    }

    #[test]
    fn submit_emits_draft_and_resets() {
        let mut form = ProductForm::new();
        form.set(Field::Name, "Widget");
        form.set(Field::Price, "9.99");

        let event = form.submit();
        assert_eq!(
            event,
            Some(ProductDraft {
                name: "Widget".to_string(),
                price: "9.99".to_string(),
                description: String::new(),
            })
        );
        assert_eq!(form.draft(), &ProductDraft::default());
        assert_eq!(form.submit(), None);
    }

    #[test]
    fn set_only_touches_one_field() {
        let mut form = ProductForm::new();
        form.set(Field::Name, "Lamp");
        form.set(Field::Description, "desk lamp");
        form.set(Field::Name, "Floor lamp");
        assert_eq!(form.draft().name, "Floor lamp");
        assert_eq!(form.draft().description, "desk lamp");
        assert_eq!(form.draft().price, "");
    }

    #[test]
    fn parses_field_names() {
        assert_eq!("price".parse::<Field>(), Ok(Field::Price));
        assert!("colour".parse::<Field>().is_err());
    }
}
