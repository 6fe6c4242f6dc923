//! The definition of the unstructured token sequence itself.

/// An unstructured node in the sequence. See the
/// [module-level documentation](crate::node::unstructured) for more information.
#[derive(PartialEq, Debug, Clone)]
pub enum UnstructuredNode {
    /// Free text typed into a text box. It is run through the text parser when upgraded, and kept as
    /// literal text if that fails.
    Text(String),

    /// A number which the editor has already recognised.
    Number(f64),

    /// A variable, denoted by a particular character.
    Variable(char),

    /// An operator between two operands, such as `Add`, named as in the construct table.
    Operator(String),

    /// A nested region whose contents are read as if they appeared in place.
    Region(UnstructuredNodeList),

    /// A function-like or laid-out construct, such as `Sine` or `DefiniteIntegral`, with one token
    /// sequence per editor region, in on-screen reading order.
    Construct(String, Vec<UnstructuredNodeList>),

    /// A matrix of `rows` by `cols` cells, given row-major.
    Matrix { name: String, rows: usize, cols: usize, cells: Vec<UnstructuredNodeList> },
}

impl UnstructuredNode {
    pub fn text(text: impl Into<String>) -> Self {
        UnstructuredNode::Text(text.into())
    }

    pub fn operator(name: impl Into<String>) -> Self {
        UnstructuredNode::Operator(name.into())
    }

    pub fn construct(name: impl Into<String>, regions: Vec<UnstructuredNodeList>) -> Self {
        UnstructuredNode::Construct(name.into(), regions)
    }
}

/// An ordered sequence of unstructured nodes.
#[derive(PartialEq, Debug, Clone, Default)]
pub struct UnstructuredNodeList {
    pub items: Vec<UnstructuredNode>
}

impl UnstructuredNodeList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Visits the nodes of this list in reading order, with [UnstructuredNode::Region]s replaced by
    /// their contents.
    pub fn flattened(&self) -> Vec<&UnstructuredNode> {
        fn walk<'a>(list: &'a UnstructuredNodeList, out: &mut Vec<&'a UnstructuredNode>) {
            for item in &list.items {
                match item {
                    UnstructuredNode::Region(inner) => walk(inner, out),
                    other => out.push(other),
                }
            }
        }

        let mut out = Vec::with_capacity(self.items.len());
        walk(self, &mut out);
        out
    }
}

impl From<Vec<UnstructuredNode>> for UnstructuredNodeList {
    fn from(items: Vec<UnstructuredNode>) -> Self {
        UnstructuredNodeList { items }
    }
}

impl FromIterator<UnstructuredNode> for UnstructuredNodeList {
    fn from_iter<T: IntoIterator<Item = UnstructuredNode>>(iter: T) -> Self {
        UnstructuredNodeList { items: iter.into_iter().collect() }
    }
}
