//! Shared builders for hand-constructing the untyped trees the parser
//! would produce.

#![allow(dead_code)]

use lachs::Span;

use basalt::ast::expression::{
    Assign, Binary, Block, BoolLit, Call, Cast, CharLit, Closure, Deref, Expression, FloatLit,
    Ident, If, IntegerLit, Match, Ref, Sizeof, StrLit, Unary, UnitLit,
};
use basalt::ast::name::Name;
use basalt::ast::pattern::{ConstructorPattern, LiteralPattern, MatchArm, Pattern, Wildcard};
use basalt::ast::statement::{Return, Statement, VarDecl, While};
use basalt::ast::{
    Assoc, Constructor, ExternDecl, Function, Import, Module, OpDef, Operator, Param, Program,
    TopLevel, TypeDef,
};
use basalt::types::ty::Type;

pub fn span() -> Span {
    Span::default()
}

// ── Programs and modules ───────────────────────────────────────────────

pub fn program(modules: Vec<Module<()>>) -> Program<()> {
    Program { modules }
}

pub fn module(
    path: &[&str],
    name: &str,
    imports: Vec<Import>,
    top_levels: Vec<TopLevel<()>>,
) -> Module<()> {
    Module {
        path: path.iter().map(|s| s.to_string()).collect(),
        name: name.to_string(),
        imports,
        top_levels,
    }
}

/// A single-module program `module main;` with the given top-levels.
pub fn main_module(top_levels: Vec<TopLevel<()>>) -> Program<()> {
    program(vec![module(&[], "main", Vec::new(), top_levels)])
}

pub fn import(public: bool, path: &[&str]) -> Import {
    Import {
        public,
        path: path.iter().map(|s| s.to_string()).collect(),
        position: span(),
    }
}

// ── Top-levels ─────────────────────────────────────────────────────────

pub fn func(
    name: &str,
    public: bool,
    params: Vec<Param<()>>,
    ret_annotation: Option<Type>,
    body: Expression<()>,
) -> TopLevel<()> {
    TopLevel::Function(Function {
        public,
        name: unqualified_ident(name),
        params,
        ret_annotation,
        body,
        position: span(),
    })
}

pub fn op(
    symbol: &str,
    public: bool,
    assoc: Assoc,
    precedence: u32,
    params: Vec<Param<()>>,
    ret_annotation: Option<Type>,
    body: Expression<()>,
) -> TopLevel<()> {
    TopLevel::Operator(Operator {
        public,
        def: OpDef {
            assoc,
            precedence,
            symbol: symbol.to_string(),
        },
        symbol: unqualified_ident(symbol),
        params,
        ret_annotation,
        body,
        position: span(),
    })
}

pub fn param(name: &str, annotation: Option<Type>) -> Param<()> {
    Param {
        name: unqualified_ident(name),
        annotation,
        position: span(),
    }
}

pub fn type_def(name: &str, public: bool, params: &[&str], constructors: Vec<Constructor>) -> TopLevel<()> {
    TopLevel::TypeDef(TypeDef {
        public,
        name: Name::unqualified(name),
        params: params.iter().map(|s| s.to_string()).collect(),
        constructors,
        position: span(),
    })
}

pub fn constructor(name: &str, args: Vec<Type>) -> Constructor {
    Constructor {
        name: Name::unqualified(name),
        args,
        position: span(),
    }
}

pub fn extern_decl(name: &str, params: Vec<Type>, ret: Type) -> TopLevel<()> {
    TopLevel::Extern(ExternDecl {
        name: Name::unqualified(name),
        params,
        ret,
        position: span(),
    })
}

// ── Expressions ────────────────────────────────────────────────────────

fn unqualified_ident(name: &str) -> Ident<()> {
    Ident {
        name: Name::unqualified(name),
        position: span(),
        info: (),
    }
}

pub fn ident(name: &str) -> Expression<()> {
    Expression::Ident(unqualified_ident(name))
}

pub fn qualified(path: &[&str], name: &str) -> Expression<()> {
    Expression::Ident(Ident {
        name: Name::qualified(path.iter().map(|s| s.to_string()).collect(), name),
        position: span(),
        info: (),
    })
}

pub fn int(value: i64) -> Expression<()> {
    Expression::Integer(IntegerLit {
        value,
        position: span(),
        info: (),
    })
}

pub fn float(value: f64) -> Expression<()> {
    Expression::Float(FloatLit {
        value,
        position: span(),
        info: (),
    })
}

pub fn string(value: &str) -> Expression<()> {
    Expression::Str(StrLit {
        value: value.to_string(),
        position: span(),
        info: (),
    })
}

pub fn character(value: char) -> Expression<()> {
    Expression::Char(CharLit {
        value,
        position: span(),
        info: (),
    })
}

pub fn boolean(value: bool) -> Expression<()> {
    Expression::Bool(BoolLit {
        value,
        position: span(),
        info: (),
    })
}

pub fn unit() -> Expression<()> {
    Expression::Unit(UnitLit {
        position: span(),
        info: (),
    })
}

pub fn binary(operator: &str, lhs: Expression<()>, rhs: Expression<()>) -> Expression<()> {
    Expression::Binary(Binary {
        op: Name::unqualified(operator),
        lhs: Box::new(lhs),
        rhs: Box::new(rhs),
        position: span(),
        info: (),
    })
}

pub fn unary(operator: &str, operand: Expression<()>) -> Expression<()> {
    Expression::Unary(Unary {
        op: Name::unqualified(operator),
        operand: Box::new(operand),
        position: span(),
        info: (),
    })
}

pub fn call(func: Expression<()>, args: Vec<Expression<()>>) -> Expression<()> {
    Expression::Call(Call {
        func: Box::new(func),
        args,
        position: span(),
        info: (),
    })
}

pub fn if_expr(
    condition: Expression<()>,
    then_branch: Expression<()>,
    else_branch: Expression<()>,
) -> Expression<()> {
    Expression::If(If {
        condition: Box::new(condition),
        then_branch: Box::new(then_branch),
        else_branch: Box::new(else_branch),
        position: span(),
        info: (),
    })
}

pub fn match_expr(scrutinee: Expression<()>, arms: Vec<MatchArm<()>>) -> Expression<()> {
    Expression::Match(Match {
        scrutinee: Box::new(scrutinee),
        arms,
        position: span(),
        info: (),
    })
}

pub fn arm(pattern: Pattern<()>, body: Expression<()>) -> MatchArm<()> {
    MatchArm {
        pattern,
        body,
        position: span(),
    }
}

pub fn block(statements: Vec<Statement<()>>) -> Expression<()> {
    Expression::Block(Block {
        statements,
        position: span(),
        info: (),
    })
}

pub fn assign(target: Expression<()>, value: Expression<()>) -> Expression<()> {
    Expression::Assign(Assign {
        target: Box::new(target),
        value: Box::new(value),
        position: span(),
        info: (),
    })
}

pub fn ref_of(operand: Expression<()>) -> Expression<()> {
    Expression::Ref(Ref {
        operand: Box::new(operand),
        position: span(),
        info: (),
    })
}

pub fn deref(operand: Expression<()>) -> Expression<()> {
    Expression::Deref(Deref {
        operand: Box::new(operand),
        position: span(),
        info: (),
    })
}

pub fn cast(operand: Expression<()>, target: Type) -> Expression<()> {
    Expression::Cast(Cast {
        operand: Box::new(operand),
        target,
        position: span(),
        info: (),
    })
}

pub fn sizeof(target: Type) -> Expression<()> {
    Expression::Sizeof(Sizeof {
        target,
        position: span(),
        info: (),
    })
}

pub fn closure(params: Vec<Param<()>>, body: Expression<()>) -> Expression<()> {
    Expression::Closure(Closure {
        params,
        body: Box::new(body),
        position: span(),
        info: (),
    })
}

// ── Statements ─────────────────────────────────────────────────────────

pub fn decl(name: &str, mutable: bool, value: Expression<()>) -> Statement<()> {
    Statement::Decl(VarDecl {
        name: unqualified_ident(name),
        mutable,
        value: Box::new(value),
        position: span(),
    })
}

pub fn expr_stmt(expr: Expression<()>) -> Statement<()> {
    Statement::Expression(expr)
}

pub fn while_stmt(condition: Expression<()>, body: Expression<()>) -> Statement<()> {
    Statement::While(While {
        condition: Box::new(condition),
        body: Box::new(body),
        position: span(),
    })
}

pub fn ret_stmt(value: Option<Expression<()>>) -> Statement<()> {
    Statement::Return(Return {
        value: value.map(Box::new),
        position: span(),
    })
}

// ── Patterns ───────────────────────────────────────────────────────────

pub fn pat_var(name: &str) -> Pattern<()> {
    Pattern::Ident(unqualified_ident(name))
}

pub fn pat_int(value: i64) -> Pattern<()> {
    Pattern::Literal(LiteralPattern::Integer(value, span(), ()))
}

pub fn pat_bool(value: bool) -> Pattern<()> {
    Pattern::Literal(LiteralPattern::Boolean(value, span(), ()))
}

pub fn pat_wild() -> Pattern<()> {
    Pattern::Wildcard(Wildcard {
        position: span(),
        info: (),
    })
}

pub fn pat_con(name: &str, bindings: &[&str]) -> Pattern<()> {
    Pattern::Constructor(ConstructorPattern {
        name: Name::unqualified(name),
        bindings: bindings.iter().map(|b| unqualified_ident(b)).collect(),
        position: span(),
        info: (),
    })
}

// ── Types ──────────────────────────────────────────────────────────────

pub fn named_type(name: &str) -> Type {
    Type::con(Name::unqualified(name))
}

pub fn applied_type(name: &str, args: Vec<Type>) -> Type {
    Type::Con(Name::unqualified(name), args)
}
