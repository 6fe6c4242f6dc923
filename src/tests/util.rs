macro_rules! uns_list {
    ($($x:expr),* $(,)?) => { crate::UnstructuredNodeList { items: vec![ $($x),* ] } };
}

macro_rules! token {
    (+)             => { crate::UnstructuredNode::operator("Add") };
    (-)             => { crate::UnstructuredNode::operator("Subtract") };
    (*)             => { crate::UnstructuredNode::operator("Multiply") };
    (/)             => { crate::UnstructuredNode::operator("Divide") };
    (^)             => { crate::UnstructuredNode::operator("Power") };
    (=)             => { crate::UnstructuredNode::operator("Equals") };
    (var $v:ident)  => { crate::UnstructuredNode::Variable(stringify!($v).chars().nth(0).unwrap()) };
    ($x:literal)    => { crate::UnstructuredNode::Number($x as f64) };
}

macro_rules! tokens {
    ($($x:tt) *) => { crate::UnstructuredNodeList { items: vec![ $(token!($x)),* ] } };
}

macro_rules! text {
    ($s:expr) => { crate::UnstructuredNode::Text(($s).to_string()) };
}

macro_rules! construct {
    ($name:literal $(, $r:expr)* $(,)?) => { crate::UnstructuredNode::construct($name, vec![ $($r),* ]) };
}

macro_rules! upgrade {
    ($t:expr) => {
        <_ as crate::Upgradable>::upgrade(&$t, &crate::ConstructTable::builtin())
    };
}

macro_rules! tree {
    ($t:expr) => { upgrade!($t).unwrap().to_string() };
}

macro_rules! parse {
    ($s:expr) => { crate::parse_text($s, &crate::ConstructTable::builtin()).unwrap() };
}

macro_rules! render {
    ($n:expr, $f:ident, $o:expr $(,)?) => {
        crate::serialize(&$n, &crate::FormatTemplates::builtin(crate::BuiltinFormat::$f), &$o).unwrap()
    };

    ($n:expr, $f:ident $(,)?) => { render!($n, $f, crate::SerializeOptions::default()) };
}

/// ```text
///        1+2
///  12 + ----- + x
///        3+4
/// ```
pub fn complex_unstructured_expression() -> crate::UnstructuredNodeList {
    uns_list!(
        token!(12),
        token!(+),
        construct!("Divide",
            tokens!(1 + 2),
            tokens!(3 + 4),
        ),
        token!(+),
        token!(var x),
    )
}
