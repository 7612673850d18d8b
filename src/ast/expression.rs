use lachs::Span;

use super::name::Name;
use super::pattern::MatchArm;
use super::statement::Statement;
use crate::types::ty::Type;

#[derive(Debug, Clone)]
pub enum Expression<T> {
    Integer(IntegerLit<T>),
    Float(FloatLit<T>),
    Str(StrLit<T>),
    Char(CharLit<T>),
    Bool(BoolLit<T>),
    Unit(UnitLit<T>),
    Ident(Ident<T>),
    Binary(Binary<T>),
    Unary(Unary<T>),
    Call(Call<T>),
    If(If<T>),
    Match(Match<T>),
    Block(Block<T>),
    Assign(Assign<T>),
    Ref(Ref<T>),
    Deref(Deref<T>),
    Cast(Cast<T>),
    Sizeof(Sizeof<T>),
    Closure(Closure<T>),
}

impl<T> Expression<T> {
    /// Get the source position of this expression.
    pub fn position(&self) -> Span {
        match self {
            Expression::Integer(e) => e.position.clone(),
            Expression::Float(e) => e.position.clone(),
            Expression::Str(e) => e.position.clone(),
            Expression::Char(e) => e.position.clone(),
            Expression::Bool(e) => e.position.clone(),
            Expression::Unit(e) => e.position.clone(),
            Expression::Ident(e) => e.position.clone(),
            Expression::Binary(e) => e.position.clone(),
            Expression::Unary(e) => e.position.clone(),
            Expression::Call(e) => e.position.clone(),
            Expression::If(e) => e.position.clone(),
            Expression::Match(e) => e.position.clone(),
            Expression::Block(e) => e.position.clone(),
            Expression::Assign(e) => e.position.clone(),
            Expression::Ref(e) => e.position.clone(),
            Expression::Deref(e) => e.position.clone(),
            Expression::Cast(e) => e.position.clone(),
            Expression::Sizeof(e) => e.position.clone(),
            Expression::Closure(e) => e.position.clone(),
        }
    }

    /// Get the annotation carried by this expression node.
    pub fn info(&self) -> &T {
        match self {
            Expression::Integer(e) => &e.info,
            Expression::Float(e) => &e.info,
            Expression::Str(e) => &e.info,
            Expression::Char(e) => &e.info,
            Expression::Bool(e) => &e.info,
            Expression::Unit(e) => &e.info,
            Expression::Ident(e) => &e.info,
            Expression::Binary(e) => &e.info,
            Expression::Unary(e) => &e.info,
            Expression::Call(e) => &e.info,
            Expression::If(e) => &e.info,
            Expression::Match(e) => &e.info,
            Expression::Block(e) => &e.info,
            Expression::Assign(e) => &e.info,
            Expression::Ref(e) => &e.info,
            Expression::Deref(e) => &e.info,
            Expression::Cast(e) => &e.info,
            Expression::Sizeof(e) => &e.info,
            Expression::Closure(e) => &e.info,
        }
    }

    pub fn map_info<U>(self, f: &mut impl FnMut(T) -> U) -> Expression<U> {
        match self {
            Expression::Integer(e) => Expression::Integer(IntegerLit {
                value: e.value,
                position: e.position,
                info: f(e.info),
            }),
            Expression::Float(e) => Expression::Float(FloatLit {
                value: e.value,
                position: e.position,
                info: f(e.info),
            }),
            Expression::Str(e) => Expression::Str(StrLit {
                value: e.value,
                position: e.position,
                info: f(e.info),
            }),
            Expression::Char(e) => Expression::Char(CharLit {
                value: e.value,
                position: e.position,
                info: f(e.info),
            }),
            Expression::Bool(e) => Expression::Bool(BoolLit {
                value: e.value,
                position: e.position,
                info: f(e.info),
            }),
            Expression::Unit(e) => Expression::Unit(UnitLit {
                position: e.position,
                info: f(e.info),
            }),
            Expression::Ident(e) => Expression::Ident(e.map_info(f)),
            Expression::Binary(e) => Expression::Binary(Binary {
                op: e.op,
                lhs: Box::new(e.lhs.map_info(f)),
                rhs: Box::new(e.rhs.map_info(f)),
                position: e.position,
                info: f(e.info),
            }),
            Expression::Unary(e) => Expression::Unary(Unary {
                op: e.op,
                operand: Box::new(e.operand.map_info(f)),
                position: e.position,
                info: f(e.info),
            }),
            Expression::Call(e) => Expression::Call(Call {
                func: Box::new(e.func.map_info(f)),
                args: e.args.into_iter().map(|a| a.map_info(f)).collect(),
                position: e.position,
                info: f(e.info),
            }),
            Expression::If(e) => Expression::If(If {
                condition: Box::new(e.condition.map_info(f)),
                then_branch: Box::new(e.then_branch.map_info(f)),
                else_branch: Box::new(e.else_branch.map_info(f)),
                position: e.position,
                info: f(e.info),
            }),
            Expression::Match(e) => Expression::Match(Match {
                scrutinee: Box::new(e.scrutinee.map_info(f)),
                arms: e.arms.into_iter().map(|a| a.map_info(f)).collect(),
                position: e.position,
                info: f(e.info),
            }),
            Expression::Block(e) => Expression::Block(Block {
                statements: e.statements.into_iter().map(|s| s.map_info(f)).collect(),
                position: e.position,
                info: f(e.info),
            }),
            Expression::Assign(e) => Expression::Assign(Assign {
                target: Box::new(e.target.map_info(f)),
                value: Box::new(e.value.map_info(f)),
                position: e.position,
                info: f(e.info),
            }),
            Expression::Ref(e) => Expression::Ref(Ref {
                operand: Box::new(e.operand.map_info(f)),
                position: e.position,
                info: f(e.info),
            }),
            Expression::Deref(e) => Expression::Deref(Deref {
                operand: Box::new(e.operand.map_info(f)),
                position: e.position,
                info: f(e.info),
            }),
            Expression::Cast(e) => Expression::Cast(Cast {
                operand: Box::new(e.operand.map_info(f)),
                target: e.target,
                position: e.position,
                info: f(e.info),
            }),
            Expression::Sizeof(e) => Expression::Sizeof(Sizeof {
                target: e.target,
                position: e.position,
                info: f(e.info),
            }),
            Expression::Closure(e) => Expression::Closure(Closure {
                params: e.params.into_iter().map(|p| p.map_info(f)).collect(),
                body: Box::new(e.body.map_info(f)),
                position: e.position,
                info: f(e.info),
            }),
        }
    }
}

impl Expression<Type> {
    /// The inferred type of this expression.
    pub fn ty(&self) -> &Type {
        self.info()
    }
}

#[derive(Debug, Clone)]
pub struct Ident<T> {
    pub name: Name,
    pub position: Span,
    pub info: T,
}

impl<T> Ident<T> {
    pub fn map_info<U>(self, f: &mut impl FnMut(T) -> U) -> Ident<U> {
        Ident {
            name: self.name,
            position: self.position,
            info: f(self.info),
        }
    }
}

#[derive(Debug, Clone)]
pub struct IntegerLit<T> {
    pub value: i64,
    pub position: Span,
    pub info: T,
}

#[derive(Debug, Clone)]
pub struct FloatLit<T> {
    pub value: f64,
    pub position: Span,
    pub info: T,
}

#[derive(Debug, Clone)]
pub struct StrLit<T> {
    pub value: String,
    pub position: Span,
    pub info: T,
}

#[derive(Debug, Clone)]
pub struct CharLit<T> {
    pub value: char,
    pub position: Span,
    pub info: T,
}

#[derive(Debug, Clone)]
pub struct BoolLit<T> {
    pub value: bool,
    pub position: Span,
    pub info: T,
}

#[derive(Debug, Clone)]
pub struct UnitLit<T> {
    pub position: Span,
    pub info: T,
}

/// Binary operator application. `op` is either one of the built-in operator
/// symbols or the name of a user-defined operator, resolved like any other
/// use site.
#[derive(Debug, Clone)]
pub struct Binary<T> {
    pub op: Name,
    pub lhs: Box<Expression<T>>,
    pub rhs: Box<Expression<T>>,
    pub position: Span,
    pub info: T,
}

/// Prefix or postfix application of a user-defined operator.
#[derive(Debug, Clone)]
pub struct Unary<T> {
    pub op: Name,
    pub operand: Box<Expression<T>>,
    pub position: Span,
    pub info: T,
}

#[derive(Debug, Clone)]
pub struct Call<T> {
    pub func: Box<Expression<T>>,
    pub args: Vec<Expression<T>>,
    pub position: Span,
    pub info: T,
}

#[derive(Debug, Clone)]
pub struct If<T> {
    pub condition: Box<Expression<T>>,
    pub then_branch: Box<Expression<T>>,
    pub else_branch: Box<Expression<T>>,
    pub position: Span,
    pub info: T,
}

#[derive(Debug, Clone)]
pub struct Match<T> {
    pub scrutinee: Box<Expression<T>>,
    pub arms: Vec<MatchArm<T>>,
    pub position: Span,
    pub info: T,
}

#[derive(Debug, Clone)]
pub struct Block<T> {
    pub statements: Vec<Statement<T>>,
    pub position: Span,
    pub info: T,
}

/// Assignment to an lvalue: a mutable variable or a dereference.
#[derive(Debug, Clone)]
pub struct Assign<T> {
    pub target: Box<Expression<T>>,
    pub value: Box<Expression<T>>,
    pub position: Span,
    pub info: T,
}

/// `&e` - take the address of a variable.
#[derive(Debug, Clone)]
pub struct Ref<T> {
    pub operand: Box<Expression<T>>,
    pub position: Span,
    pub info: T,
}

/// `*e` - dereference a pointer.
#[derive(Debug, Clone)]
pub struct Deref<T> {
    pub operand: Box<Expression<T>>,
    pub position: Span,
    pub info: T,
}

/// `e as T` - unchecked conversion.
#[derive(Debug, Clone)]
pub struct Cast<T> {
    pub operand: Box<Expression<T>>,
    pub target: Type,
    pub position: Span,
    pub info: T,
}

#[derive(Debug, Clone)]
pub struct Sizeof<T> {
    pub target: Type,
    pub position: Span,
    pub info: T,
}

/// Anonymous function. Carried through resolution but rejected by the
/// inferrer; see the error taxonomy.
#[derive(Debug, Clone)]
pub struct Closure<T> {
    pub params: Vec<super::Param<T>>,
    pub body: Box<Expression<T>>,
    pub position: Span,
    pub info: T,
}
