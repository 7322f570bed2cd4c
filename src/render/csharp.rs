//! C# printer: 4-space indentation, Allman braces, one blank line between
//! members.
use crate::ir::{
    BinOp, CompilationUnit, ConstructorDecl, DocComment, Expr, Member, MethodDecl, Param, PropertyBody,
    PropertyDecl, Stmt, TypeDecl, TypeKind, TypeRef,
};
use crate::render::Printer;
use crate::render::doc::{doc_lines, header_lines};

#[derive(Debug, Clone, Default)]
pub struct CSharpPrinter {
    /// Free-form text emitted as leading `//` lines.
    pub header: Option<String>,
}

impl CSharpPrinter {
    pub fn new(header: Option<String>) -> Self {
        Self { header }
    }
}

impl Printer for CSharpPrinter {
    fn file_extension(&self) -> &'static str {
        "cs"
    }

    fn print(&self, unit: &CompilationUnit) -> String {
        let mut w = Writer::default();
        if let Some(header) = &self.header {
            for line in header_lines(header) {
                w.line(line);
            }
            w.blank();
        }
        if !unit.usings.is_empty() {
            for using in &unit.usings {
                w.line(format!("using {using};"));
            }
            w.blank();
        }
        w.line(format!("namespace {}", unit.namespace));
        w.open();
        type_decl(&mut w, &unit.decl);
        w.close();
        w.out
    }
}

// ————————————————————————————————————————————————————————————————————————————
// WRITER
// ————————————————————————————————————————————————————————————————————————————

#[derive(Default)]
struct Writer {
    out: String,
    indent: usize,
}

impl Writer {
    fn line(&mut self, text: impl AsRef<str>) {
        for _ in 0..self.indent {
            self.out.push_str("    ");
        }
        self.out.push_str(text.as_ref());
        self.out.push('\n');
    }

    fn blank(&mut self) {
        self.out.push('\n');
    }

    fn open(&mut self) {
        self.line("{");
        self.indent += 1;
    }

    fn close(&mut self) {
        self.indent = self.indent.saturating_sub(1);
        self.line("}");
    }

    fn doc(&mut self, doc: Option<&DocComment>) {
        for line in doc.map(doc_lines).unwrap_or_default() {
            self.line(line);
        }
    }
}

fn with_modifiers(modifiers: &[String], rest: String) -> String {
    if modifiers.is_empty() { rest } else { format!("{} {rest}", modifiers.join(" ")) }
}

// ————————————————————————————————————————————————————————————————————————————
// DECLARATIONS
// ————————————————————————————————————————————————————————————————————————————

fn type_decl(w: &mut Writer, decl: &TypeDecl) {
    let keyword = match decl.kind {
        TypeKind::Class => "class",
        TypeKind::Interface => "interface",
        TypeKind::Enum => "enum",
    };
    let mut head = with_modifiers(&decl.modifiers, format!("{keyword} {}", decl.name));
    if !decl.bases.is_empty() {
        let bases: Vec<String> = decl.bases.iter().map(type_ref).collect();
        head = format!("{head} : {}", bases.join(", "));
    }
    w.doc(decl.doc.as_ref());
    w.line(head);
    w.open();
    let last = decl.members.len().saturating_sub(1);
    for (i, m) in decl.members.iter().enumerate() {
        match m {
            Member::EnumValue { name, doc } => {
                w.doc(doc.as_ref());
                w.line(if i == last { name.clone() } else { format!("{name},") });
                continue;
            }
            Member::Property(p) => property(w, p, decl.kind),
            Member::Constructor(c) => constructor(w, c, &decl.name),
            Member::Method(m) => method(w, m),
        }
        if i != last {
            w.blank();
        }
    }
    w.close();
}

fn params(params: &[Param]) -> String {
    params
        .iter()
        .map(|p| format!("{} {}", type_ref(&p.ty), p.name))
        .collect::<Vec<_>>()
        .join(", ")
}

fn property(w: &mut Writer, p: &PropertyDecl, owner: TypeKind) {
    w.doc(p.doc.as_ref());
    let head = with_modifiers(&p.modifiers, format!("{} {}", type_ref(&p.ty), p.name));
    match &p.body {
        PropertyBody::Auto => w.line(format!("{head} {{ get; set; }}")),
        PropertyBody::Abstract => w.line(format!("{head} {{ get; }}")),
        PropertyBody::Getter(e) if owner != TypeKind::Interface => {
            w.line(head);
            w.open();
            w.line("get");
            w.open();
            w.line(format!("return {};", expr(e)));
            w.close();
            w.close();
        }
        PropertyBody::Getter(_) => w.line(format!("{head} {{ get; }}")),
    }
}

fn constructor(w: &mut Writer, c: &ConstructorDecl, class_name: &str) {
    w.doc(c.doc.as_ref());
    w.line(with_modifiers(&c.modifiers, format!("{class_name}({})", params(&c.params))));
    block(w, &c.body);
}

fn method(w: &mut Writer, m: &MethodDecl) {
    w.doc(m.doc.as_ref());
    let returns = m.returns.as_ref().map(type_ref).unwrap_or_else(|| "void".to_string());
    let generics = if m.type_params.is_empty() {
        String::new()
    } else {
        let names: Vec<&str> = m.type_params.iter().map(|t| t.name.as_str()).collect();
        format!("<{}>", names.join(", "))
    };
    let mut head = with_modifiers(&m.modifiers, format!("{returns} {}{generics}({})", m.name, params(&m.params)));
    for t in m.type_params.iter().filter(|t| !t.constraints.is_empty()) {
        head = format!("{head} where {} : {}", t.name, t.constraints.join(", "));
    }
    match &m.body {
        Some(body) => {
            w.line(head);
            block(w, body);
        }
        None => w.line(format!("{head};")),
    }
}

pub fn type_ref(ty: &TypeRef) -> String {
    match ty {
        TypeRef::Named(name) => name.clone(),
        TypeRef::Generic(name, args) => {
            let args: Vec<String> = args.iter().map(type_ref).collect();
            format!("{name}<{}>", args.join(", "))
        }
    }
}

// ————————————————————————————————————————————————————————————————————————————
// STATEMENTS
// ————————————————————————————————————————————————————————————————————————————

fn block(w: &mut Writer, body: &[Stmt]) {
    w.open();
    for s in body {
        stmt(w, s);
    }
    w.close();
}

fn stmt(w: &mut Writer, s: &Stmt) {
    match s {
        Stmt::Expr(e) => w.line(format!("{};", expr(e))),
        Stmt::Assign(target, value) => w.line(format!("{} = {};", expr(target), expr(value))),
        Stmt::Local { name, ty, init } => {
            let ty = ty.as_ref().map(type_ref).unwrap_or_else(|| "var".to_string());
            w.line(format!("{ty} {name} = {};", expr(init)));
        }
        Stmt::Return(e) => w.line(format!("return {};", expr(e))),
        Stmt::If { cond, then, otherwise } => {
            w.line(format!("if ({})", expr(cond)));
            block(w, then);
            if !otherwise.is_empty() {
                w.line("else");
                block(w, otherwise);
            }
        }
        Stmt::For { index, bound, body } => {
            w.line(format!("for (int {index} = 0; {index} < {}; ++{index})", expr(bound)));
            block(w, body);
        }
        Stmt::ForEach { var, ty, iterable, body } => {
            let ty = ty.as_ref().map(type_ref).unwrap_or_else(|| "var".to_string());
            w.line(format!("foreach ({ty} {var} in {})", expr(iterable)));
            block(w, body);
        }
        Stmt::Switch { subject, cases, default } => {
            w.line(format!("switch ({})", expr(subject)));
            w.open();
            for (label, body) in cases {
                w.line(format!("case {}:", expr(label)));
                w.indent += 1;
                body.iter().for_each(|s| stmt(w, s));
                w.indent -= 1;
            }
            if !default.is_empty() {
                w.line("default:");
                w.indent += 1;
                default.iter().for_each(|s| stmt(w, s));
                w.indent -= 1;
            }
            w.close();
        }
        Stmt::Throw(e) => w.line(format!("throw {};", expr(e))),
        Stmt::Unchecked(body) => {
            w.line("unchecked");
            block(w, body);
        }
    }
}

// ————————————————————————————————————————————————————————————————————————————
// EXPRESSIONS
// ————————————————————————————————————————————————————————————————————————————

const CONDITIONAL: u8 = 1;
const RELATIONAL: u8 = 8;
const UNARY: u8 = 11;
const PRIMARY: u8 = 12;

fn binary_precedence(op: BinOp) -> u8 {
    match op {
        BinOp::Or => 2,
        BinOp::Eq | BinOp::Ne => 7,
        BinOp::Add => 9,
        BinOp::Mul => 10,
    }
}

fn symbol(op: BinOp) -> &'static str {
    match op {
        BinOp::Eq => "==",
        BinOp::Ne => "!=",
        BinOp::Or => "||",
        BinOp::Add => "+",
        BinOp::Mul => "*",
    }
}

fn precedence(e: &Expr) -> u8 {
    match e {
        Expr::Conditional(..) => CONDITIONAL,
        Expr::Binary(_, op, _) => binary_precedence(*op),
        Expr::As(..) => RELATIONAL,
        Expr::Not(_) | Expr::Cast(..) => UNARY,
        Expr::Int(n) if *n < 0 => UNARY,
        _ => PRIMARY,
    }
}

/// Render `e`, parenthesized when it binds looser than `min`.
fn operand(e: &Expr, min: u8) -> String {
    let text = expr(e);
    if precedence(e) < min { format!("({text})") } else { text }
}

fn args(args: &[Expr]) -> String {
    args.iter().map(expr).collect::<Vec<_>>().join(", ")
}

pub fn expr(e: &Expr) -> String {
    match e {
        Expr::Ident(name) => name.clone(),
        Expr::This => "this".to_string(),
        Expr::Null => "null".to_string(),
        Expr::Bool(b) => b.to_string(),
        Expr::Int(n) => n.to_string(),
        Expr::Type(ty) => type_ref(ty),
        Expr::Member(target, name) => format!("{}.{name}", operand(target, PRIMARY)),
        Expr::Index(target, index) => format!("{}[{}]", operand(target, PRIMARY), expr(index)),
        Expr::Call { callee, args: a } => format!("{}({})", operand(callee, PRIMARY), args(a)),
        Expr::New { ty, args: a } => format!("new {}({})", type_ref(ty), args(a)),
        Expr::Cast(ty, inner) => format!("({}){}", type_ref(ty), operand(inner, UNARY)),
        Expr::As(inner, ty) => format!("{} as {}", operand(inner, RELATIONAL), type_ref(ty)),
        Expr::Binary(lhs, op, rhs) => {
            let p = binary_precedence(*op);
            format!("{} {} {}", operand(lhs, p), symbol(*op), operand(rhs, p + 1))
        }
        Expr::Not(inner) => format!("!{}", operand(inner, UNARY)),
        Expr::Conditional(cond, then, otherwise) => format!(
            "{} ? {} : {}",
            operand(cond, CONDITIONAL + 1),
            operand(then, CONDITIONAL),
            operand(otherwise, CONDITIONAL)
        ),
        Expr::OutVar(name) => format!("out var {name}"),
    }
}
