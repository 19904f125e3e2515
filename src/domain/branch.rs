/// Represents the branch a release is cut from
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BranchContext {
    pub name: String,
    pub is_release: bool,
}

impl BranchContext {
    /// Create a branch context, checking the name against the configured release branches
    pub fn new(name: impl Into<String>, release_branches: &[String]) -> Self {
        let name_str = name.into();
        let is_release = release_branches.iter().any(|b| *b == name_str);

        BranchContext {
            name: name_str,
            is_release,
        }
    }

    /// Check if releases may be cut from this branch
    pub fn is_release_branch(&self) -> bool {
        self.is_release
    }
}
