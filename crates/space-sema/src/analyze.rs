//! The top-down semantic walk: name resolution, declaration/type
//! bookkeeping, modifier enforcement, and statement-placement rules.

use rustc_hash::{FxHashMap, FxHashSet};

use space_common::{Diagnostic, TokenKind};
use space_parser::ast::{self, AstNode, Expr};
use space_parser::cst::SyntaxNode;
use space_parser::syntax_kind::SyntaxKind;
use space_parser::Parse;

use crate::error::SemanticError;
use crate::external::ExternalReference;
use crate::scope::{Entry, EntryKind, ScopeArena, ScopeKind, Visibility};
use crate::ty::{self, VarDec};

pub struct AnalysisResult {
    pub diagnostics: Vec<Diagnostic>,
    pub externals: Vec<ExternalReference>,
}

/// Walks a parsed source file once, producing diagnostics and the
/// queue of `include` paths for an out-of-crate resolver to chase.
/// Holds no state across calls, so running it twice on the same input
/// yields identical output.
pub fn analyze(parse: &Parse) -> AnalysisResult {
    let tree = parse.tree();
    let root = tree.syntax();
    let mut analyzer = Analyzer::new(root);
    let global = analyzer.scopes.root();
    analyzer.walk_statements(root, global);
    AnalysisResult {
        diagnostics: analyzer.diagnostics,
        externals: analyzer.externals,
    }
}

/// What a composite access's left operand denotes, for the
/// access-operator-correctness check: a class-scoped base requires
/// `->`, an enum-scoped base is exempt from the check entirely, and
/// anything else requires `.`.
enum BaseKind {
    Class(String),
    EnumLike(String),
    NonClass,
}

/// Builds the parameter-type signature of a function or constructor
/// from its AST, independent of any scope -- used both by the
/// forward-reference pre-scan and by per-class duplicate-constructor
/// detection.
fn build_params_sig(params: Option<ast::ParamList>) -> Vec<VarDec> {
    let Some(params) = params else {
        return Vec::new();
    };
    params
        .params()
        .map(|param| {
            let ptype = param.var_type();
            let type_name = ptype
                .as_ref()
                .and_then(|t| t.type_name())
                .unwrap_or_else(|| "unknown".to_string());
            let dims = ptype.as_ref().map(|t| t.dim_count() as u32).unwrap_or(0);
            if ty::is_primitive(&type_name) {
                VarDec::primitive(type_name, dims, false)
            } else {
                VarDec::class(type_name, dims, false)
            }
        })
        .collect()
}

/// The name a call targets, for signature lookup: a bare function
/// call's identifier, or a method call's member name.
fn call_target_name(call: &ast::FunctionCall) -> Option<String> {
    match call.callee()? {
        Expr::Ident(id) => id.name(),
        Expr::MemberClassAccess(m) => m.member_name(),
        _ => None,
    }
}

fn describe_expr(expr: &Expr) -> String {
    match expr {
        Expr::Ident(id) => id.name().unwrap_or_else(|| "<expression>".to_string()),
        Expr::This(_) => "this".to_string(),
        _ => "<expression>".to_string(),
    }
}

struct Analyzer {
    scopes: ScopeArena,
    diagnostics: Vec<Diagnostic>,
    externals: Vec<ExternalReference>,
    known_classes: FxHashSet<String>,
    known_enums: FxHashSet<String>,
    class_scopes: FxHashMap<String, usize>,
    function_sigs: FxHashMap<String, Vec<VarDec>>,
    constructor_sigs: FxHashMap<String, Vec<Vec<VarDec>>>,
    current_class: Vec<String>,
    loop_depth: u32,
    check_depth: u32,
    function_depth: u32,
}

impl Analyzer {
    fn new(root: &SyntaxNode) -> Analyzer {
        let mut known_classes = FxHashSet::default();
        let mut known_enums = FxHashSet::default();
        let mut function_sigs = FxHashMap::default();
        let mut constructor_sigs: FxHashMap<String, Vec<Vec<VarDec>>> = FxHashMap::default();
        for node in root.descendants() {
            match node.kind() {
                SyntaxKind::ClassDecl => {
                    if let Some(class) = ast::ClassDecl::cast(node) {
                        if let Some(name) = class.name() {
                            known_classes.insert(name.clone());
                            let sigs: Vec<Vec<VarDec>> = class
                                .constructors()
                                .map(|c| build_params_sig(c.params()))
                                .collect();
                            if !sigs.is_empty() {
                                constructor_sigs.insert(name, sigs);
                            }
                        }
                    }
                }
                SyntaxKind::EnumDecl => {
                    if let Some(name) = ast::EnumDecl::cast(node).and_then(|e| e.name()) {
                        known_classes.insert(name.clone());
                        known_enums.insert(name);
                    }
                }
                SyntaxKind::FunctionDecl => {
                    if let Some(func) = ast::FunctionDecl::cast(node) {
                        if let Some(name) = func.name() {
                            function_sigs.insert(name, build_params_sig(func.params()));
                        }
                    }
                }
                _ => {}
            }
        }
        Analyzer {
            scopes: ScopeArena::new(),
            diagnostics: Vec::new(),
            externals: Vec::new(),
            known_classes,
            known_enums,
            class_scopes: FxHashMap::default(),
            function_sigs,
            constructor_sigs,
            current_class: Vec::new(),
            loop_depth: 0,
            check_depth: 0,
            function_depth: 0,
        }
    }

    fn span_of(&self, node: &SyntaxNode) -> space_common::Span {
        let range = node.text_range();
        space_common::Span::new(range.start().into(), range.end().into())
    }

    fn error(&mut self, err: SemanticError) {
        let category = err.category();
        let span = err.span();
        self.diagnostics
            .push(Diagnostic::new(category, err.to_string(), span));
    }

    fn visibility_of(&self, modifiers: Option<ast::ModifierList>) -> Visibility {
        let Some(m) = modifiers else {
            return Visibility::Default;
        };
        if m.has(TokenKind::Global) {
            Visibility::Global
        } else if m.has(TokenKind::PGlobal) {
            Visibility::PGlobal
        } else if m.has(TokenKind::Private) {
            Visibility::Private
        } else if m.has(TokenKind::Secure) {
            Visibility::Secure
        } else {
            Visibility::Default
        }
    }

    fn walk_statements(&mut self, parent: &SyntaxNode, scope: usize) {
        for child in parent.children() {
            self.walk_statement(&child, scope);
        }
    }

    fn walk_statement(&mut self, node: &SyntaxNode, scope: usize) {
        match node.kind() {
            SyntaxKind::VarDecl
            | SyntaxKind::ConstDecl
            | SyntaxKind::ArrayVarDecl
            | SyntaxKind::ConditionalVarDecl
            | SyntaxKind::ClassInstanceVarDecl => self.declare_var(node, scope),
            SyntaxKind::FunctionDecl => {
                if !matches!(self.scopes.kind(scope), ScopeKind::Global | ScopeKind::Class) {
                    self.error(SemanticError::MisplacedStatement {
                        what: "function",
                        span: self.span_of(node),
                    });
                }
                self.walk_function(node, scope);
            }
            SyntaxKind::ClassDecl => {
                if self.scopes.kind(scope) != ScopeKind::Global {
                    self.error(SemanticError::MisplacedStatement {
                        what: "class",
                        span: self.span_of(node),
                    });
                }
                self.walk_class(node, scope);
            }
            SyntaxKind::ClassConstructor => {
                if self.scopes.kind(scope) != ScopeKind::Class {
                    self.error(SemanticError::MisplacedStatement {
                        what: "constructor",
                        span: self.span_of(node),
                    });
                }
                self.walk_constructor(node, scope);
            }
            SyntaxKind::EnumDecl => {
                if self.scopes.kind(scope) != ScopeKind::Global {
                    self.error(SemanticError::MisplacedStatement {
                        what: "enum",
                        span: self.span_of(node),
                    });
                }
                self.walk_enum(node, scope);
            }
            SyntaxKind::IncludeDecl => {
                if self.scopes.kind(scope) != ScopeKind::Global {
                    self.error(SemanticError::MisplacedStatement {
                        what: "include",
                        span: self.span_of(node),
                    });
                }
                self.walk_include(node);
            }
            SyntaxKind::ExportDecl => self.walk_export(node, scope),
            SyntaxKind::IfStmt => self.walk_if(node, scope),
            SyntaxKind::WhileStmt => self.walk_while(node, scope),
            SyntaxKind::DoWhileStmt => self.walk_do_while(node, scope),
            SyntaxKind::ForStmt => self.walk_for(node, scope),
            SyntaxKind::CheckStmt => self.walk_check(node, scope),
            SyntaxKind::TryStmt => self.walk_try(node, scope),
            SyntaxKind::ReturnStmt => self.check_return(node, scope),
            SyntaxKind::BreakStmt => self.check_break(node),
            SyntaxKind::ContinueStmt => self.check_continue(node),
            SyntaxKind::Block => {
                let inner = self.scopes.open(scope, ScopeKind::Block);
                self.walk_statements(node, inner);
            }
            SyntaxKind::ExprStmt
            | SyntaxKind::SimpleIncDecAssign
            | SyntaxKind::ConditionalAssignment => self.walk_expr_statement(node, scope),
            _ => {}
        }
    }

    fn declare_var(&mut self, node: &SyntaxNode, scope: usize) {
        let Some(decl) = ast::AnyVarDecl::cast(node.clone()) else {
            return;
        };
        let name = decl.name().unwrap_or_default();
        let var_type = decl.var_type();
        let type_name = var_type
            .as_ref()
            .and_then(|t| t.type_name())
            .unwrap_or_else(|| "unknown".to_string());
        let array_dims = var_type.as_ref().map(|t| t.dim_count() as u32).unwrap_or(0);
        if !ty::is_primitive(&type_name) && !self.known_classes.contains(&type_name) {
            self.error(SemanticError::UnknownType {
                name: type_name.clone(),
                span: self.span_of(node),
            });
        }
        let dec = if ty::is_primitive(&type_name) {
            VarDec::primitive(type_name.clone(), array_dims, decl.is_const())
        } else {
            VarDec::class(type_name.clone(), array_dims, decl.is_const())
        };
        let visibility = self.visibility_of(decl.modifiers());
        let entry = Entry {
            name: name.clone(),
            dec,
            visibility,
            span: self.span_of(node),
            kind: EntryKind::Variable,
        };
        if self.scopes.declare(scope, entry).is_err() {
            self.error(SemanticError::Redeclaration {
                name,
                span: self.span_of(node),
            });
        }
        for expr in node.children().filter_map(Expr::cast) {
            self.check_expr(&expr, scope);
        }
    }

    fn walk_function(&mut self, node: &SyntaxNode, scope: usize) {
        let Some(func) = ast::FunctionDecl::cast(node.clone()) else {
            return;
        };
        let name = func.name().unwrap_or_default();
        let visibility = self.visibility_of(func.modifiers());
        let entry = Entry {
            name: name.clone(),
            dec: VarDec::primitive("function", 0, false),
            visibility,
            span: self.span_of(node),
            kind: EntryKind::Function,
        };
        if self.scopes.declare(scope, entry).is_err() {
            self.error(SemanticError::Redeclaration {
                name,
                span: self.span_of(node),
            });
        }
        let fn_scope = self.scopes.open(scope, ScopeKind::Function);
        self.declare_params(func.params(), fn_scope);
        self.function_depth += 1;
        if let Some(body) = func.body() {
            self.walk_statements(body.syntax(), fn_scope);
        }
        self.function_depth -= 1;
    }

    fn walk_constructor(&mut self, node: &SyntaxNode, scope: usize) {
        let Some(ctor) = ast::ClassConstructor::cast(node.clone()) else {
            return;
        };
        let ctor_scope = self.scopes.open(scope, ScopeKind::Function);
        self.declare_params(ctor.params(), ctor_scope);
        self.function_depth += 1;
        if let Some(body) = ctor.body() {
            self.walk_statements(body.syntax(), ctor_scope);
        }
        self.function_depth -= 1;
    }

    fn declare_params(&mut self, params: Option<ast::ParamList>, scope: usize) {
        let Some(params) = params else { return };
        for param in params.params() {
            let pname = param.name().unwrap_or_default();
            let ptype = param.var_type();
            let type_name = ptype
                .as_ref()
                .and_then(|t| t.type_name())
                .unwrap_or_else(|| "unknown".to_string());
            let dims = ptype.as_ref().map(|t| t.dim_count() as u32).unwrap_or(0);
            let dec = if ty::is_primitive(&type_name) {
                VarDec::primitive(type_name, dims, false)
            } else {
                VarDec::class(type_name, dims, false)
            };
            let entry = Entry {
                name: pname.clone(),
                dec,
                visibility: Visibility::Default,
                span: self.span_of(param.syntax()),
                kind: EntryKind::Variable,
            };
            if self.scopes.declare(scope, entry).is_err() {
                self.error(SemanticError::Redeclaration {
                    name: pname,
                    span: self.span_of(param.syntax()),
                });
            }
        }
    }

    fn walk_class(&mut self, node: &SyntaxNode, scope: usize) {
        let Some(class) = ast::ClassDecl::cast(node.clone()) else {
            return;
        };
        let name = class.name().unwrap_or_default();
        let class_entry = Entry {
            name: name.clone(),
            dec: VarDec::class(name.clone(), 0, true),
            visibility: Visibility::Default,
            span: self.span_of(node),
            kind: EntryKind::Class,
        };
        if self.scopes.declare(scope, class_entry).is_err() {
            self.error(SemanticError::Redeclaration {
                name: name.clone(),
                span: self.span_of(node),
            });
        }
        let class_scope = self.scopes.open_class(scope, name.clone());
        self.class_scopes.insert(name.clone(), class_scope);
        self.current_class.push(name);
        for field in class.fields() {
            self.declare_var(field.syntax(), class_scope);
        }
        let mut seen_ctor_sigs: Vec<Vec<VarDec>> = Vec::new();
        for ctor in class.constructors() {
            let sig = build_params_sig(ctor.params());
            let is_dup = seen_ctor_sigs.iter().any(|seen| {
                seen.len() == sig.len() && seen.iter().zip(sig.iter()).all(|(a, b)| a.strict_eq(b))
            });
            if is_dup {
                self.error(SemanticError::Redeclaration {
                    name: "constructor".to_string(),
                    span: self.span_of(ctor.syntax()),
                });
            } else {
                seen_ctor_sigs.push(sig);
            }
            self.walk_constructor(ctor.syntax(), class_scope);
        }
        for function in class.functions() {
            self.walk_function(function.syntax(), class_scope);
        }
        self.current_class.pop();
    }

    fn walk_enum(&mut self, node: &SyntaxNode, scope: usize) {
        let Some(e) = ast::EnumDecl::cast(node.clone()) else {
            return;
        };
        let name = e.name().unwrap_or_default();
        let entry = Entry {
            name: name.clone(),
            dec: VarDec::class(name.clone(), 0, true),
            visibility: Visibility::Default,
            span: self.span_of(node),
            kind: EntryKind::Class,
        };
        if self.scopes.declare(scope, entry).is_err() {
            self.error(SemanticError::Redeclaration {
                name,
                span: self.span_of(node),
            });
        }
        let mut seen = FxHashSet::default();
        for enumerator in e.enumerators() {
            let ename = enumerator.name().unwrap_or_default();
            if !seen.insert(ename.clone()) {
                self.error(SemanticError::Redeclaration {
                    name: ename,
                    span: self.span_of(enumerator.syntax()),
                });
            }
        }
    }

    fn walk_include(&mut self, node: &SyntaxNode) {
        let Some(inc) = ast::IncludeDecl::cast(node.clone()) else {
            return;
        };
        if let Some(path) = inc.path() {
            let path = path.trim_matches('"').to_string();
            self.externals.push(ExternalReference {
                path,
                span: self.span_of(node),
            });
        }
    }

    fn walk_export(&mut self, node: &SyntaxNode, scope: usize) {
        let Some(exp) = ast::ExportDecl::cast(node.clone()) else {
            return;
        };
        if let Some(name) = exp.name() {
            if self.scopes.resolve(scope, &name).is_none() {
                self.error(SemanticError::UndeclaredName {
                    name,
                    span: self.span_of(node),
                });
            }
        }
    }

    fn walk_if(&mut self, node: &SyntaxNode, scope: usize) {
        let Some(ifstmt) = ast::IfStmt::cast(node.clone()) else {
            return;
        };
        if let Some(cond) = node.children().find_map(Expr::cast) {
            self.check_expr(&cond, scope);
        }
        if let Some(then) = ifstmt.then_branch() {
            let inner = self.scopes.open(scope, ScopeKind::Block);
            self.walk_statements(then.syntax(), inner);
        }
        for clause in ifstmt.else_if_clauses() {
            if let Some(cond) = clause.syntax().children().find_map(Expr::cast) {
                self.check_expr(&cond, scope);
            }
            if let Some(body) = clause.body() {
                let inner = self.scopes.open(scope, ScopeKind::Block);
                self.walk_statements(body.syntax(), inner);
            }
        }
        if let Some(else_clause) = ifstmt.else_clause() {
            if let Some(body) = else_clause.body() {
                let inner = self.scopes.open(scope, ScopeKind::Block);
                self.walk_statements(body.syntax(), inner);
            }
        }
    }

    fn walk_while(&mut self, node: &SyntaxNode, scope: usize) {
        let Some(w) = ast::WhileStmt::cast(node.clone()) else {
            return;
        };
        if let Some(cond) = node.children().find_map(Expr::cast) {
            self.check_expr(&cond, scope);
        }
        self.loop_depth += 1;
        if let Some(body) = w.body() {
            let inner = self.scopes.open(scope, ScopeKind::Block);
            self.walk_statements(body.syntax(), inner);
        }
        self.loop_depth -= 1;
    }

    fn walk_do_while(&mut self, node: &SyntaxNode, scope: usize) {
        let Some(w) = ast::DoWhileStmt::cast(node.clone()) else {
            return;
        };
        self.loop_depth += 1;
        if let Some(body) = w.body() {
            let inner = self.scopes.open(scope, ScopeKind::Block);
            self.walk_statements(body.syntax(), inner);
        }
        self.loop_depth -= 1;
        if let Some(cond) = node.children().find_map(Expr::cast) {
            self.check_expr(&cond, scope);
        }
    }

    fn walk_for(&mut self, node: &SyntaxNode, scope: usize) {
        let Some(f) = ast::ForStmt::cast(node.clone()) else {
            return;
        };
        let for_scope = self.scopes.open(scope, ScopeKind::Block);
        for child in node.children() {
            match child.kind() {
                SyntaxKind::VarDecl
                | SyntaxKind::ConstDecl
                | SyntaxKind::ArrayVarDecl
                | SyntaxKind::ConditionalVarDecl
                | SyntaxKind::ClassInstanceVarDecl => self.declare_var(&child, for_scope),
                SyntaxKind::ExprStmt
                | SyntaxKind::SimpleIncDecAssign
                | SyntaxKind::ConditionalAssignment => self.walk_expr_statement(&child, for_scope),
                SyntaxKind::Block => {}
                _ => {
                    if let Some(expr) = Expr::cast(child) {
                        self.check_expr(&expr, for_scope);
                    }
                }
            }
        }
        self.loop_depth += 1;
        if let Some(body) = f.body() {
            self.walk_statements(body.syntax(), for_scope);
        }
        self.loop_depth -= 1;
    }

    fn walk_check(&mut self, node: &SyntaxNode, scope: usize) {
        let Some(c) = ast::CheckStmt::cast(node.clone()) else {
            return;
        };
        if let Some(cond) = node.children().find_map(Expr::cast) {
            self.check_expr(&cond, scope);
        }
        self.check_depth += 1;
        for clause in c.is_clauses() {
            let inner = self.scopes.open(scope, ScopeKind::Block);
            let mut children = clause.syntax().children();
            if let Some(first) = children.next() {
                if let Some(cond) = Expr::cast(first.clone()) {
                    self.check_expr(&cond, inner);
                } else {
                    self.walk_statement(&first, inner);
                }
            }
            for child in children {
                self.walk_statement(&child, inner);
            }
        }
        self.check_depth -= 1;
    }

    fn walk_try(&mut self, node: &SyntaxNode, scope: usize) {
        let Some(t) = ast::TryStmt::cast(node.clone()) else {
            return;
        };
        if let Some(body) = t.try_body() {
            let inner = self.scopes.open(scope, ScopeKind::Block);
            self.walk_statements(body.syntax(), inner);
        }
        if let Some(catch) = t.catch_clause() {
            let catch_scope = self.scopes.open(scope, ScopeKind::Block);
            if let Some(ename) = catch.exception_name() {
                let etype = catch.exception_type();
                let type_name = etype
                    .as_ref()
                    .and_then(|t| t.type_name())
                    .unwrap_or_else(|| "Exception".to_string());
                let dims = etype.as_ref().map(|t| t.dim_count() as u32).unwrap_or(0);
                if !ty::is_primitive(&type_name) && !self.known_classes.contains(&type_name) {
                    self.error(SemanticError::UnknownType {
                        name: type_name.clone(),
                        span: self.span_of(catch.syntax()),
                    });
                }
                let dec = if ty::is_primitive(&type_name) {
                    VarDec::primitive(type_name, dims, false)
                } else {
                    VarDec::class(type_name, dims, false)
                };
                let entry = Entry {
                    name: ename,
                    dec,
                    visibility: Visibility::Default,
                    span: self.span_of(catch.syntax()),
                    kind: EntryKind::Variable,
                };
                let _ = self.scopes.declare(catch_scope, entry);
            }
            if let Some(body) = catch.body() {
                self.walk_statements(body.syntax(), catch_scope);
            }
        }
    }

    fn check_return(&mut self, node: &SyntaxNode, scope: usize) {
        if self.function_depth == 0 {
            self.error(SemanticError::MisplacedStatement {
                what: "return",
                span: self.span_of(node),
            });
        }
        if let Some(expr) = node.children().find_map(Expr::cast) {
            self.check_expr(&expr, scope);
        }
    }

    fn check_break(&mut self, node: &SyntaxNode) {
        if self.loop_depth == 0 && self.check_depth == 0 {
            self.error(SemanticError::MisplacedStatement {
                what: "break",
                span: self.span_of(node),
            });
        }
    }

    fn check_continue(&mut self, node: &SyntaxNode) {
        if self.loop_depth == 0 && self.check_depth == 0 {
            self.error(SemanticError::MisplacedStatement {
                what: "continue",
                span: self.span_of(node),
            });
        }
    }

    fn walk_expr_statement(&mut self, node: &SyntaxNode, scope: usize) {
        let children: Vec<Expr> = node.children().filter_map(Expr::cast).collect();
        for e in &children {
            self.check_expr(e, scope);
        }
        if children.len() >= 2 {
            self.check_const_assignment(&children[0], scope);
        }
    }

    fn check_const_assignment(&mut self, lhs: &Expr, scope: usize) {
        if let Expr::Ident(id) = lhs {
            if let Some(name) = id.name() {
                if let Some(entry) = self.scopes.resolve(scope, &name) {
                    if entry.dec.constant {
                        self.error(SemanticError::ConstReassignment {
                            name,
                            span: self.span_of(id.syntax()),
                        });
                    }
                }
            }
        }
    }

    /// A minimal, best-effort type inference used only to drive the
    /// arity/type and access-operator checks -- not a full unification
    /// pass. Expressions it cannot type (unresolved names, bare calls)
    /// resolve to `None` and are simply not checked further.
    fn infer_type(&self, expr: &Expr, scope: usize) -> Option<VarDec> {
        match expr {
            Expr::Number(_) => Some(VarDec::primitive("int", 0, false)),
            Expr::Float(_) => Some(VarDec::primitive("float", 0, false)),
            Expr::String(_) => Some(VarDec::primitive("string", 0, false)),
            Expr::Bool(_) => Some(VarDec::primitive("bool", 0, false)),
            Expr::Null(_) | Expr::Pointer(_) | Expr::Reference(_) | Expr::AndOr(_) => None,
            Expr::This(_) => self
                .current_class
                .last()
                .map(|c| VarDec::class(c.clone(), 0, false)),
            Expr::Ident(id) => id
                .name()
                .and_then(|n| self.scopes.resolve(scope, &n))
                .map(|e| e.dec.clone()),
            Expr::Paren(p) => p
                .syntax()
                .children()
                .find_map(Expr::cast)
                .and_then(|inner| self.infer_type(&inner, scope)),
            Expr::Unary(u) => u
                .syntax()
                .children()
                .find_map(Expr::cast)
                .and_then(|inner| self.infer_type(&inner, scope)),
            Expr::Binary(b) => b.lhs().and_then(|lhs| self.infer_type(&lhs, scope)),
            Expr::New(n) => n.class_name().map(|c| VarDec::class(c, 0, false)),
            Expr::ArrayAccess(a) => {
                let base_ty = a.base().and_then(|b| self.infer_type(&b, scope))?;
                if base_ty.array_dims == 0 {
                    None
                } else {
                    Some(VarDec {
                        array_dims: base_ty.array_dims - 1,
                        ..base_ty
                    })
                }
            }
            Expr::MemberClassAccess(m) => {
                let base = m.base()?;
                let owner_class = match self.classify_base(&base, scope) {
                    BaseKind::Class(c) | BaseKind::EnumLike(c) => c,
                    BaseKind::NonClass => return None,
                };
                let class_scope = *self.class_scopes.get(&owner_class)?;
                let member_name = m.member_name()?;
                self.scopes
                    .resolve_local(class_scope, &member_name)
                    .map(|e| e.dec.clone())
            }
            Expr::Call(_) => None,
        }
    }

    /// Classifies a composite access's left operand for the
    /// access-operator-correctness check.
    fn classify_base(&self, base: &Expr, scope: usize) -> BaseKind {
        if let Expr::This(_) = base {
            return self
                .current_class
                .last()
                .cloned()
                .map(BaseKind::Class)
                .unwrap_or(BaseKind::NonClass);
        }
        if let Expr::Ident(id) = base {
            if let Some(name) = id.name() {
                if let Some(entry) = self.scopes.resolve(scope, &name) {
                    if entry.kind == EntryKind::Class {
                        return BaseKind::Class(name);
                    }
                    return classify_class_type(entry.dec.class_type.as_deref(), &self.known_enums);
                }
            }
            return BaseKind::NonClass;
        }
        match self.infer_type(base, scope) {
            Some(dec) => classify_class_type(dec.class_type.as_deref(), &self.known_enums),
            None => BaseKind::NonClass,
        }
    }

    fn check_expr(&mut self, expr: &Expr, scope: usize) {
        match expr {
            Expr::Ident(id) => {
                if let Some(name) = id.name() {
                    if self.scopes.resolve(scope, &name).is_none() {
                        self.error(SemanticError::UndeclaredName {
                            name,
                            span: self.span_of(id.syntax()),
                        });
                    }
                }
            }
            Expr::Binary(b) => {
                if let Some(lhs) = b.lhs() {
                    self.check_expr(&lhs, scope);
                }
                if let Some(rhs) = b.rhs() {
                    self.check_expr(&rhs, scope);
                }
                self.check_binary_types(b, scope);
            }
            Expr::Unary(u) => {
                if let Some(inner) = u.syntax().children().find_map(Expr::cast) {
                    self.check_expr(&inner, scope);
                }
            }
            Expr::Paren(p) => {
                if let Some(inner) = p.syntax().children().find_map(Expr::cast) {
                    self.check_expr(&inner, scope);
                }
            }
            Expr::MemberClassAccess(m) => {
                if let Some(base) = m.base() {
                    self.check_member_access(m, &base, scope);
                    self.check_expr(&base, scope);
                }
            }
            Expr::ArrayAccess(a) => {
                self.check_array_access_chain(a, scope);
            }
            Expr::Call(c) => {
                if let Some(callee) = c.callee() {
                    self.check_expr(&callee, scope);
                }
                let mut args = Vec::new();
                if let Some(arg_list) = c.args() {
                    for arg in arg_list.args() {
                        if let Some(value) = arg.value() {
                            self.check_expr(&value, scope);
                            args.push(value);
                        }
                    }
                }
                if let Some(name) = call_target_name(c) {
                    self.check_call_signature(&name, &args, scope, self.span_of(c.syntax()));
                }
            }
            Expr::New(n) => {
                if let Some(class_name) = n.class_name() {
                    if !self.known_classes.contains(&class_name) {
                        self.error(SemanticError::UnknownType {
                            name: class_name.clone(),
                            span: self.span_of(n.syntax()),
                        });
                    }
                    let mut args = Vec::new();
                    if let Some(arg_list) = n.args() {
                        for arg in arg_list.args() {
                            if let Some(value) = arg.value() {
                                self.check_expr(&value, scope);
                                args.push(value);
                            }
                        }
                    }
                    self.check_constructor_call(&class_name, &args, scope, self.span_of(n.syntax()));
                }
            }
            Expr::AndOr(a) => {
                for child in a.syntax().children().filter_map(Expr::cast) {
                    self.check_expr(&child, scope);
                }
            }
            Expr::This(_)
            | Expr::Number(_)
            | Expr::Float(_)
            | Expr::String(_)
            | Expr::Bool(_)
            | Expr::Null(_)
            | Expr::Pointer(_)
            | Expr::Reference(_) => {}
        }
    }

    fn check_binary_types(&mut self, b: &ast::BinaryExpr, scope: usize) {
        let Some(op) = b.operator() else { return };
        if !matches!(op.as_str(), "+" | "-" | "*" | "/" | "%") {
            return;
        }
        let (Some(lhs), Some(rhs)) = (b.lhs(), b.rhs()) else {
            return;
        };
        let (Some(lhs_ty), Some(rhs_ty)) = (self.infer_type(&lhs, scope), self.infer_type(&rhs, scope))
        else {
            return;
        };
        if !lhs_ty.non_strict_eq(&rhs_ty) {
            self.error(SemanticError::TypeMismatch {
                expected: lhs_ty.base_type,
                found: rhs_ty.base_type,
                span: self.span_of(b.syntax()),
            });
        }
    }

    /// Walks a chain of `[index]` suffixes down to its base expression,
    /// checking each index and comparing the chain's length against the
    /// base's declared array dimension. Reports at most one diagnostic,
    /// anchored on the outermost access.
    fn check_array_access_chain(&mut self, access: &ast::ArrayAccess, scope: usize) {
        let mut depth: u32 = 0;
        let mut cur = Expr::ArrayAccess(access.clone());
        let base = loop {
            match cur {
                Expr::ArrayAccess(a) => {
                    depth += 1;
                    if let Some(index) = a.index() {
                        self.check_expr(&index, scope);
                    }
                    match a.base() {
                        Some(b) => cur = b,
                        None => break None,
                    }
                }
                other => break Some(other),
            }
        };
        let Some(base) = base else { return };
        self.check_expr(&base, scope);
        if let Some(base_ty) = self.infer_type(&base, scope) {
            if depth > base_ty.array_dims {
                self.error(SemanticError::NoSuchArrayDimension {
                    name: describe_expr(&base),
                    span: self.span_of(access.syntax()),
                });
            }
        }
    }

    fn check_call_signature(&mut self, name: &str, args: &[Expr], scope: usize, span: space_common::Span) {
        let Some(sig) = self.function_sigs.get(name).cloned() else {
            return;
        };
        if sig.len() != args.len() {
            self.error(SemanticError::ArityMismatch {
                name: name.to_string(),
                expected: sig.len(),
                found: args.len(),
                span,
            });
            return;
        }
        for (param_ty, arg) in sig.iter().zip(args.iter()) {
            if let Some(arg_ty) = self.infer_type(arg, scope) {
                if !param_ty.non_strict_eq(&arg_ty) {
                    self.error(SemanticError::TypeMismatch {
                        expected: param_ty.base_type.clone(),
                        found: arg_ty.base_type,
                        span: self.span_of(arg.syntax()),
                    });
                }
            }
        }
    }

    fn check_constructor_call(
        &mut self,
        class_name: &str,
        args: &[Expr],
        scope: usize,
        span: space_common::Span,
    ) {
        let Some(sigs) = self.constructor_sigs.get(class_name).cloned() else {
            return;
        };
        let Some(sig) = sigs.iter().find(|s| s.len() == args.len()) else {
            self.error(SemanticError::ArityMismatch {
                name: class_name.to_string(),
                expected: sigs[0].len(),
                found: args.len(),
                span,
            });
            return;
        };
        for (param_ty, arg) in sig.iter().zip(args.iter()) {
            if let Some(arg_ty) = self.infer_type(arg, scope) {
                if !param_ty.non_strict_eq(&arg_ty) {
                    self.error(SemanticError::TypeMismatch {
                        expected: param_ty.base_type.clone(),
                        found: arg_ty.base_type,
                        span: self.span_of(arg.syntax()),
                    });
                }
            }
        }
    }

    /// Checks a composite access two ways: the `.`/`->` operator must
    /// match whether the base is class-scoped (enum-scoped bases are
    /// exempt from this check), and, when the base resolves to a known
    /// class, the accessed member's visibility must permit the access.
    fn check_member_access(&mut self, access: &ast::MemberClassAccess, base: &Expr, scope: usize) {
        let Some(member_name) = access.member_name() else {
            return;
        };
        let base_kind = self.classify_base(base, scope);
        let is_arrow = access.is_arrow();
        let owner_class = match &base_kind {
            BaseKind::Class(name) => {
                if !is_arrow {
                    self.error(SemanticError::WrongAccessor {
                        name: member_name.clone(),
                        span: self.span_of(access.syntax()),
                    });
                }
                Some(name.clone())
            }
            BaseKind::EnumLike(_) => None,
            BaseKind::NonClass => {
                if is_arrow {
                    self.error(SemanticError::WrongAccessor {
                        name: member_name.clone(),
                        span: self.span_of(access.syntax()),
                    });
                }
                None
            }
        };
        let Some(owner_class) = owner_class else {
            return;
        };
        let Some(&class_scope) = self.class_scopes.get(&owner_class) else {
            return;
        };
        let Some(entry) = self.scopes.resolve_local(class_scope, &member_name) else {
            return;
        };
        let same_class = self.current_class.last() == Some(&owner_class);
        let forbidden = matches!(entry.visibility, Visibility::Private | Visibility::Secure) && !same_class;
        if forbidden {
            self.error(SemanticError::IllegalAccess {
                name: member_name,
                span: self.span_of(access.syntax()),
            });
        }
    }
}

fn classify_class_type(class_type: Option<&str>, known_enums: &FxHashSet<String>) -> BaseKind {
    match class_type {
        Some(name) if known_enums.contains(name) => BaseKind::EnumLike(name.to_string()),
        Some(name) => BaseKind::Class(name.to_string()),
        None => BaseKind::NonClass,
    }
}
