//! 产品列表

use crate::app::product::model::Product;

/// 删除控件触发的事件，携带产品标识
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeleteRequested(pub String);

/// 列表中的一行
#[derive(Debug, Clone, PartialEq)]
pub struct ListEntry {
    pub id: String,
    pub label: String,
}

impl ListEntry {
    pub fn delete(&self) -> DeleteRequested {
        DeleteRequested(self.id.clone())
    }
}

/// 无状态的列表视图，顺序与接口返回一致
pub struct ProductList<'a> {
    products: &'a [Product],
}

impl<'a> ProductList<'a> {
    pub fn new(products: &'a [Product]) -> Self {
        Self { products }
    }

    pub fn entries(&self) -> Vec<ListEntry> {
        self.products
            .iter()
            .map(|p| ListEntry {
                id: p.id.clone(),
                label: format!("{} - ${}", p.name, p.price),
            })
            .collect()
    }

    /// 按 1 开始的序号或产品标识查找删除控件
    pub fn delete_control(&self, selector: &str) -> Option<DeleteRequested> {
        let entries = self.entries();
        let by_index = selector
            .parse::<usize>()
            .ok()
            .and_then(|n| n.checked_sub(1))
            .and_then(|i| entries.get(i));
        by_index
            .or_else(|| entries.iter().find(|e| e.id == selector))
            .map(ListEntry::delete)
    }

    pub fn render(&self) -> String {
        if self.products.is_empty() {
            return "(no products)".to_string();
        }
        self.entries()
            .iter()
            .enumerate()
            .map(|(i, entry)| format!("{}. {}  [{}]", i + 1, entry.label, entry.id))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn product(id: &str, name: &str, price: f64) -> Product {
        Product {
            id: id.to_string(),
            name: name.to_string(),
            price,
            description: String::new(),
        }
    }

    #[test]
    fn one_entry_per_product() {
        let products = vec![product("a1", "Widget", 9.99), product("b2", "Lamp", 20.0)];
        let list = ProductList::new(&products);
        let entries = list.entries();

        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].label, "Widget - $9.99");
        assert_eq!(entries[1].label, "Lamp - $20");

        let rendered = list.render();
        assert_eq!(rendered.lines().count(), 2);
        assert!(rendered.contains("Widget") && rendered.contains("9.99"));
    }

    #[test]
    fn delete_control_emits_id() {
        let products = vec![product("abc123", "Widget", 9.99), product("b2", "Lamp", 20.0)];
        let list = ProductList::new(&products);

        assert_eq!(list.entries()[0].delete(), DeleteRequested("abc123".to_string()));
        assert_eq!(list.delete_control("2"), Some(DeleteRequested("b2".to_string())));
        assert_eq!(
            list.delete_control("abc123"),
            Some(DeleteRequested("abc123".to_string()))
        );
        assert_eq!(list.delete_control("0"), None);
        assert_eq!(list.delete_control("9"), None);
    }

    #[test]
    fn empty_list_renders_placeholder() {
        assert_eq!(ProductList::new(&[]).render(), "(no products)");
    }
}
