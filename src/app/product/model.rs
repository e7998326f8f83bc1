//! 产品数据模型

use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

/// 已存储的产品
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    /// 存储分配的标识，对客户端不透明
    #[serde(alias = "_id")]
    pub id: String,
    pub name: String,
    pub price: f64,
    #[serde(default)]
    pub description: String,
}

/// 价格输入：接受数字或数字字符串（表单直接提交输入框的文本）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PriceInput {
    Number(f64),
    Text(String),
}

impl PriceInput {
    /// 转换为有限的数值，无法转换时返回 `None`
    pub fn value(&self) -> Option<f64> {
        let value = match self {
            PriceInput::Number(n) => *n,
            PriceInput::Text(s) => s.trim().parse::<f64>().ok()?,
        };
        value.is_finite().then_some(value)
    }
}

impl From<f64> for PriceInput {
    fn from(value: f64) -> Self {
        PriceInput::Number(value)
    }
}

/// 创建产品请求
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct NewProduct {
    #[validate(length(min = 1, message = "name is required"))]
    pub name: String,

    #[validate(custom(function = "validate_price"))]
    pub price: PriceInput,

    #[serde(default)]
    pub description: Option<String>,
}

fn validate_price(price: &PriceInput) -> Result<(), ValidationError> {
    match price.value() {
        Some(_) => Ok(()),
        None => {
            let mut error = ValidationError::new("price");
            error.message = Some("price must be a number".into());
            Err(error)
        }
    }
}

/// 经过校验、等待写入存储的产品字段
#[derive(Debug, Clone, PartialEq)]
pub struct ProductRecord {
    pub name: String,
    pub price: f64,
    pub description: String,
}

impl ProductRecord {
    pub fn into_product(self, id: String) -> Product {
        Product {
            id,
            name: self.name,
            price: self.price,
            description: self.description,
        }
    }
}

impl TryFrom<NewProduct> for ProductRecord {
    type Error = validator::ValidationErrors;

    fn try_from(new: NewProduct) -> Result<Self, Self::Error> {
        new.validate()?;
        // validate_price 已保证可以转换
        let price = new.price.value().unwrap_or_default();
        Ok(Self {
            name: new.name,
            price,
            description: new.description.unwrap_or_default(),
        })
    }
}
