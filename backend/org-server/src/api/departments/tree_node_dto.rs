use org_core::TreeNode;

use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct TreeNodeDto {
    pub employee_id: String,
    pub name: String,
    pub children: Vec<TreeNodeDto>,
}

impl From<TreeNode> for TreeNodeDto {
    fn from(node: TreeNode) -> Self {
        Self {
            employee_id: node.employee_id.to_string(),
            name: node.name,
            children: node.children.into_iter().map(TreeNodeDto::from).collect(),
        }
    }
}
