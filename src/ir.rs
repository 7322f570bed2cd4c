// Language-agnostic declaration tree for codegen. No target syntax here;
// printers in `render` turn it into text.

#[derive(Debug, Clone, PartialEq)]
pub struct CompilationUnit {
    pub namespace: String,
    pub name: String,
    pub usings: Vec<String>,
    pub decl: TypeDecl,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypeKind {
    Class,
    Interface,
    Enum,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TypeDecl {
    pub kind: TypeKind,
    pub name: String,
    pub modifiers: Vec<String>,
    pub bases: Vec<TypeRef>,
    pub doc: Option<DocComment>,
    pub members: Vec<Member>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Member {
    Property(PropertyDecl),
    Constructor(ConstructorDecl),
    /// Methods and operators (`name` is e.g. `operator ==`).
    Method(MethodDecl),
    EnumValue { name: String, doc: Option<DocComment> },
}

impl Member {
    pub fn name(&self) -> &str {
        match self {
            Member::Property(p) => &p.name,
            Member::Constructor(_) => ".ctor",
            Member::Method(m) => &m.name,
            Member::EnumValue { name, .. } => name,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum PropertyBody {
    /// `{ get; set; }`.
    Auto,
    /// Expression-bodied getter.
    Getter(Expr),
    /// Interface declaration, no body.
    Abstract,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PropertyDecl {
    pub name: String,
    pub ty: TypeRef,
    pub modifiers: Vec<String>,
    pub body: PropertyBody,
    pub doc: Option<DocComment>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Param {
    pub name: String,
    pub ty: TypeRef,
}

impl Param {
    pub fn new(name: impl Into<String>, ty: TypeRef) -> Self {
        Self { name: name.into(), ty }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TypeParam {
    pub name: String,
    pub constraints: Vec<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ConstructorDecl {
    pub modifiers: Vec<String>,
    pub params: Vec<Param>,
    pub body: Vec<Stmt>,
    pub doc: Option<DocComment>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MethodDecl {
    pub name: String,
    pub modifiers: Vec<String>,
    pub type_params: Vec<TypeParam>,
    pub params: Vec<Param>,
    /// `None` → no return value.
    pub returns: Option<TypeRef>,
    /// `None` → declaration only (interfaces).
    pub body: Option<Vec<Stmt>>,
    pub doc: Option<DocComment>,
}

impl MethodDecl {
    pub fn new(name: impl Into<String>, returns: Option<TypeRef>) -> Self {
        Self {
            name: name.into(),
            modifiers: Vec::new(),
            type_params: Vec::new(),
            params: Vec::new(),
            returns,
            body: Some(Vec::new()),
            doc: None,
        }
    }
}

/// Summary / params / returns / declared failures of a member.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DocComment {
    pub summary: String,
    pub params: Vec<(String, String)>,
    pub returns: Option<String>,
    pub exceptions: Vec<(String, String)>,
}

impl DocComment {
    pub fn summary(text: impl Into<String>) -> Self {
        Self { summary: text.into(), ..Self::default() }
    }

    pub fn param(mut self, name: impl Into<String>, text: impl Into<String>) -> Self {
        self.params.push((name.into(), text.into()));
        self
    }

    pub fn returns(mut self, text: impl Into<String>) -> Self {
        self.returns = Some(text.into());
        self
    }

    pub fn exception(mut self, ty: impl Into<String>, text: impl Into<String>) -> Self {
        self.exceptions.push((ty.into(), text.into()));
        self
    }
}

// ————————————————————————————————————————————————————————————————————————————
// TYPES
// ————————————————————————————————————————————————————————————————————————————

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeRef {
    Named(String),
    Generic(String, Vec<TypeRef>),
}

impl TypeRef {
    pub fn named(name: impl Into<String>) -> Self {
        TypeRef::Named(name.into())
    }

    pub fn generic(name: impl Into<String>, args: Vec<TypeRef>) -> Self {
        TypeRef::Generic(name.into(), args)
    }
}

// ————————————————————————————————————————————————————————————————————————————
// STATEMENTS
// ————————————————————————————————————————————————————————————————————————————

#[derive(Debug, Clone, PartialEq)]
pub enum Stmt {
    Expr(Expr),
    Assign(Expr, Expr),
    /// `ty: None` → inferred (`var`).
    Local { name: String, ty: Option<TypeRef>, init: Expr },
    Return(Expr),
    If { cond: Expr, then: Vec<Stmt>, otherwise: Vec<Stmt> },
    /// `for (int index = 0; index < bound; ++index)`.
    For { index: String, bound: Expr, body: Vec<Stmt> },
    ForEach { var: String, ty: Option<TypeRef>, iterable: Expr, body: Vec<Stmt> },
    Switch { subject: Expr, cases: Vec<(Expr, Vec<Stmt>)>, default: Vec<Stmt> },
    Throw(Expr),
    /// Overflow-unchecked block.
    Unchecked(Vec<Stmt>),
}

impl Stmt {
    pub fn if_then(cond: Expr, then: Vec<Stmt>) -> Self {
        Stmt::If { cond, then, otherwise: Vec::new() }
    }

    pub fn ret(expr: Expr) -> Self {
        Stmt::Return(expr)
    }

    pub fn local(name: impl Into<String>, init: Expr) -> Self {
        Stmt::Local { name: name.into(), ty: None, init }
    }
}

// ————————————————————————————————————————————————————————————————————————————
// EXPRESSIONS
// ————————————————————————————————————————————————————————————————————————————

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinOp {
    Eq,
    Ne,
    Or,
    Add,
    Mul,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    Ident(String),
    This,
    Null,
    Bool(bool),
    Int(i64),
    /// A type used in expression position (`Comparer<T>.Default`).
    Type(TypeRef),
    Member(Box<Expr>, String),
    Index(Box<Expr>, Box<Expr>),
    Call { callee: Box<Expr>, args: Vec<Expr> },
    New { ty: TypeRef, args: Vec<Expr> },
    Cast(TypeRef, Box<Expr>),
    /// Checked conversion yielding null on mismatch (`x as T`).
    As(Box<Expr>, TypeRef),
    Binary(Box<Expr>, BinOp, Box<Expr>),
    Not(Box<Expr>),
    Conditional(Box<Expr>, Box<Expr>, Box<Expr>),
    /// Out-argument declaring a fresh local.
    OutVar(String),
}

impl Expr {
    pub fn ident(name: impl Into<String>) -> Self {
        Expr::Ident(name.into())
    }

    pub fn ty(ty: TypeRef) -> Self {
        Expr::Type(ty)
    }

    pub fn member(self, name: impl Into<String>) -> Self {
        Expr::Member(Box::new(self), name.into())
    }

    pub fn index(self, index: Expr) -> Self {
        Expr::Index(Box::new(self), Box::new(index))
    }

    pub fn call(self, args: Vec<Expr>) -> Self {
        Expr::Call { callee: Box::new(self), args }
    }

    pub fn binary(self, op: BinOp, rhs: Expr) -> Self {
        Expr::Binary(Box::new(self), op, Box::new(rhs))
    }

    pub fn equal_to(self, rhs: Expr) -> Self {
        self.binary(BinOp::Eq, rhs)
    }

    pub fn not_equal_to(self, rhs: Expr) -> Self {
        self.binary(BinOp::Ne, rhs)
    }

    pub fn or(self, rhs: Expr) -> Self {
        self.binary(BinOp::Or, rhs)
    }

    pub fn is_null(self) -> Self {
        self.equal_to(Expr::Null)
    }

    pub fn is_not_null(self) -> Self {
        self.not_equal_to(Expr::Null)
    }

    pub fn negate(self) -> Self {
        Expr::Not(Box::new(self))
    }

    pub fn conditional(cond: Expr, then: Expr, otherwise: Expr) -> Self {
        Expr::Conditional(Box::new(cond), Box::new(then), Box::new(otherwise))
    }

    pub fn cast(self, ty: TypeRef) -> Self {
        Expr::Cast(ty, Box::new(self))
    }

    pub fn new_object(ty: TypeRef, args: Vec<Expr>) -> Self {
        Expr::New { ty, args }
    }
}
