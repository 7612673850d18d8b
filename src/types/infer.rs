//! Constraint-generating type inference over the resolved AST.
//!
//! The inferrer walks each top-level in source order, annotating every
//! expression with a type and emitting equality constraints into an ambient
//! log. Function bodies are additionally solved locally so that annotations
//! and return statements can be checked against the body's type; the global
//! solve at the end of analysis produces the final substitution.

use std::collections::HashMap;

use lachs::Span;

use crate::ast::expression::{
    Assign, Binary, Block, BoolLit, Call, Cast, CharLit, Deref, Expression, FloatLit, Ident, If,
    IntegerLit, Match, Ref, Sizeof, StrLit, Unary, UnitLit,
};
use crate::ast::name::Name;
use crate::ast::pattern::{ConstructorPattern, LiteralPattern, MatchArm, Pattern, Wildcard};
use crate::ast::statement::{Return, Statement, VarDecl, While};
use crate::ast::{
    ExternDecl, Function, Module, Operator, Param, Program, TopLevel, TypeDef,
};

use super::env::{Binding, TypeEnv};
use super::error::TypeError;
use super::solve::{Constraint, solve};
use super::ty::{Type, TypeScheme, TypeVar, alpha_id};

/// Classification of a binary operator symbol.
enum OpClass {
    Arithmetic,
    Comparison,
    Boolean,
    User,
}

fn binary_op_class(op: &Name) -> OpClass {
    match op {
        Name::Unqualified(symbol) => match symbol.as_str() {
            "+" | "-" | "*" | "/" => OpClass::Arithmetic,
            "==" | "!=" | "<" | ">" | "<=" | ">=" => OpClass::Comparison,
            "&&" | "||" => OpClass::Boolean,
            _ => OpClass::User,
        },
        Name::Qualified { .. } => OpClass::User,
    }
}

pub struct Inferrer {
    env: TypeEnv,
    fresh_count: usize,
    /// Placeholder monotypes for top-levels that have not been finalized
    /// yet. This is what lets mutually recursive definitions reference each
    /// other regardless of source order.
    top_lvl_tmps: HashMap<Name, Type>,
    main_exists: bool,
    constraints: Vec<Constraint>,
}

impl Inferrer {
    pub fn new() -> Self {
        Inferrer {
            env: TypeEnv::empty(),
            fresh_count: 0,
            top_lvl_tmps: HashMap::new(),
            main_exists: false,
            constraints: Vec::new(),
        }
    }

    /// Whether a `main` function was seen in the root module.
    pub fn main_exists(&self) -> bool {
        self.main_exists
    }

    /// Drain the accumulated constraint log for the final solve.
    pub fn take_constraints(&mut self) -> Vec<Constraint> {
        std::mem::take(&mut self.constraints)
    }

    fn fresh(&mut self) -> TypeVar {
        let var = TypeVar::new(alpha_id(self.fresh_count));
        self.fresh_count += 1;
        var
    }

    fn constrain(&mut self, lhs: Type, rhs: Type, span: Span) {
        self.constraints.push(Constraint::equal(lhs, rhs, span));
    }

    fn instantiate(&mut self, scheme: &TypeScheme) -> Type {
        if scheme.vars.is_empty() {
            return scheme.ty.clone();
        }
        let map: HashMap<_, _> = scheme
            .vars
            .iter()
            .map(|v| (v.clone(), Type::Var(self.fresh())))
            .collect();
        super::subst::Substitution(map).apply(&scheme.ty)
    }

    /// Close a type over the variables not free in the environment. Binding
    /// sites currently do not generalize (every produced scheme is
    /// monomorphic), so this is unused outside tests.
    #[allow(dead_code)]
    fn generalize(&self, ty: &Type) -> TypeScheme {
        let free_in_env = self.env.free_type_vars();
        let mut vars: Vec<TypeVar> = ty
            .free_type_vars()
            .difference(&free_in_env)
            .cloned()
            .collect();
        vars.sort();
        TypeScheme::polymorphic(vars, ty.clone())
    }

    /// Run `f` against a snapshot of the environment, restoring it on every
    /// exit path so scopes cannot leak, not even through errors.
    fn scoped<R>(
        &mut self,
        f: impl FnOnce(&mut Self) -> Result<R, TypeError>,
    ) -> Result<R, TypeError> {
        let saved = self.env.clone();
        let result = f(self);
        self.env = saved;
        result
    }

    fn lookup_name(&mut self, name: &Name, span: &Span) -> Result<Type, TypeError> {
        if let Some(binding) = self.env.lookup(name) {
            let scheme = binding.scheme.clone();
            return Ok(self.instantiate(&scheme));
        }
        if let Some(placeholder) = self.top_lvl_tmps.get(name) {
            return Ok(placeholder.clone());
        }
        Err(TypeError::unbound_name(name.clone(), span.clone()))
    }

    // ── Top-level pre-pass ─────────────────────────────────────────────

    /// Seed placeholders and register constructors and externs for every
    /// module, before any body is inferred.
    fn seed_top_levels(&mut self, program: &Program<()>) -> Result<(), TypeError> {
        for module in &program.modules {
            for top_level in &module.top_levels {
                match top_level {
                    TopLevel::Function(func) => {
                        let placeholder = Type::Var(self.fresh());
                        self.top_lvl_tmps
                            .insert(func.name.name.clone(), placeholder);
                    }
                    TopLevel::Operator(op) => {
                        let placeholder = Type::Var(self.fresh());
                        self.top_lvl_tmps
                            .insert(op.symbol.name.clone(), placeholder);
                    }
                    TopLevel::TypeDef(def) => self.register_type_def(def)?,
                    TopLevel::Extern(ext) => self.register_extern(ext),
                }
            }
        }
        Ok(())
    }

    /// Register every value constructor of a type definition with its
    /// monomorphic scheme, rejecting constructors that mention type
    /// variables missing from the definition's parameter list.
    fn register_type_def(&mut self, def: &TypeDef) -> Result<(), TypeError> {
        let result_ty = Type::Con(
            def.name.clone(),
            def.params
                .iter()
                .map(|p| Type::Var(TypeVar::new(p.clone())))
                .collect(),
        );
        for constructor in &def.constructors {
            let mut unbound: Vec<TypeVar> = constructor
                .args
                .iter()
                .flat_map(|arg| arg.free_type_vars())
                .filter(|var| !def.params.contains(&var.0))
                .collect();
            unbound.sort();
            unbound.dedup();
            if !unbound.is_empty() {
                return Err(TypeError::UndefinedTypeVariable {
                    type_name: def.name.clone(),
                    vars: unbound,
                    span: constructor.position.clone(),
                });
            }
            let ty = if constructor.args.is_empty() {
                result_ty.clone()
            } else {
                Type::func(constructor.args.clone(), result_ty.clone())
            };
            self.env.insert(
                constructor.name.clone(),
                Binding::immutable(TypeScheme::monomorphic(ty)),
            );
        }
        Ok(())
    }

    fn register_extern(&mut self, ext: &ExternDecl) {
        let ty = Type::func(ext.params.clone(), ext.ret.clone());
        self.env
            .insert(ext.name.clone(), Binding::immutable(TypeScheme::monomorphic(ty)));
    }

    // ── Program walk ───────────────────────────────────────────────────

    /// Infer the whole program, producing a typed tree and filling the
    /// constraint log. The caller runs the final solve and applies the
    /// resulting substitution.
    pub fn infer_program(
        &mut self,
        program: Program<()>,
    ) -> Result<Program<Type>, TypeError> {
        self.seed_top_levels(&program)?;

        let mut modules = Vec::new();
        for module in program.modules {
            log::debug!("inferring module {}", module.full_path().join("::"));
            let in_root_main = module.path.is_empty() && module.name == "main";
            let mut top_levels = Vec::new();
            for top_level in module.top_levels {
                let typed = match top_level {
                    TopLevel::Function(func) => {
                        if in_root_main && func.name.name.base() == "main" {
                            self.main_exists = true;
                        }
                        TopLevel::Function(self.infer_function(func)?)
                    }
                    TopLevel::Operator(op) => TopLevel::Operator(self.infer_operator(op)?),
                    TopLevel::TypeDef(def) => TopLevel::TypeDef(def),
                    TopLevel::Extern(ext) => TopLevel::Extern(ext),
                };
                top_levels.push(typed);
            }
            modules.push(Module {
                path: module.path,
                name: module.name,
                imports: module.imports,
                top_levels,
            });
        }
        Ok(Program { modules })
    }

    fn infer_function(&mut self, func: Function<()>) -> Result<Function<Type>, TypeError> {
        let (name, params, body) = self.infer_callable(
            func.name,
            func.params,
            &func.ret_annotation,
            func.body,
            &func.position,
        )?;
        Ok(Function {
            public: func.public,
            name,
            params,
            ret_annotation: func.ret_annotation,
            body,
            position: func.position,
        })
    }

    fn infer_operator(&mut self, op: Operator<()>) -> Result<Operator<Type>, TypeError> {
        let (symbol, params, body) = self.infer_callable(
            op.symbol,
            op.params,
            &op.ret_annotation,
            op.body,
            &op.position,
        )?;
        Ok(Operator {
            public: op.public,
            def: op.def,
            symbol,
            params,
            ret_annotation: op.ret_annotation,
            body,
            position: op.position,
        })
    }

    /// Shared inference for functions and operators.
    ///
    /// The body's constraints are solved locally so the function's monotype
    /// can be computed; annotation and return-agreement constraints are then
    /// emitted for the global solve. Finally the pre-pass placeholder is
    /// linked to the monotype and replaced by the finalized scheme.
    fn infer_callable(
        &mut self,
        name: Ident<()>,
        params: Vec<Param<()>>,
        ret_annotation: &Option<Type>,
        body: Expression<()>,
        position: &Span,
    ) -> Result<(Ident<Type>, Vec<Param<Type>>, Expression<Type>), TypeError> {
        let param_vars: Vec<Type> = params.iter().map(|_| Type::Var(self.fresh())).collect();

        let mark = self.constraints.len();
        let (typed_params, typed_body) = self.scoped(|me| {
            let mut typed_params = Vec::new();
            for (param, var) in params.into_iter().zip(param_vars.iter()) {
                me.env.insert(
                    param.name.name.clone(),
                    Binding::immutable(TypeScheme::monomorphic(var.clone())),
                );
                typed_params.push(Param {
                    name: Ident {
                        name: param.name.name,
                        position: param.name.position,
                        info: var.clone(),
                    },
                    annotation: param.annotation,
                    position: param.position,
                });
            }
            let typed_body = me.infer_expr(body)?;
            Ok((typed_params, typed_body))
        })?;

        let sigma = solve(self.constraints[mark..].to_vec())?;
        let body_ty = sigma.apply(typed_body.ty());
        let fn_ty = Type::func(
            param_vars.iter().map(|var| sigma.apply(var)).collect(),
            body_ty.clone(),
        );

        if let Some(annotation) = ret_annotation {
            self.constrain(body_ty.clone(), annotation.clone(), position.clone());
        }
        for (param, var) in typed_params.iter().zip(param_vars.iter()) {
            if let Some(annotation) = &param.annotation {
                self.constrain(sigma.apply(var), annotation.clone(), param.position.clone());
            }
        }

        // Every return statement must agree with the body's type.
        let mut returns = Vec::new();
        collect_returns(&typed_body, &mut returns);
        for (ret_ty, ret_span) in returns {
            self.constrain(body_ty.clone(), ret_ty, ret_span);
        }

        // Link the pre-pass placeholder to the finalized monotype, then
        // replace it with the scheme so later uses instantiate instead.
        if let Some(placeholder) = self.top_lvl_tmps.remove(&name.name) {
            self.constrain(placeholder, fn_ty.clone(), position.clone());
        }
        self.env.insert(
            name.name.clone(),
            Binding::immutable(TypeScheme::monomorphic(fn_ty.clone())),
        );
        log::debug!("finalized {}: {}", name.name, fn_ty);

        let typed_name = Ident {
            name: name.name,
            position: name.position,
            info: fn_ty,
        };
        Ok((typed_name, typed_params, typed_body))
    }

    // ── Expressions ────────────────────────────────────────────────────

    fn infer_expr(&mut self, expr: Expression<()>) -> Result<Expression<Type>, TypeError> {
        match expr {
            Expression::Integer(lit) => Ok(Expression::Integer(IntegerLit {
                value: lit.value,
                position: lit.position,
                info: Type::Int32,
            })),
            Expression::Float(lit) => Ok(Expression::Float(FloatLit {
                value: lit.value,
                position: lit.position,
                info: Type::Float64,
            })),
            Expression::Str(lit) => Ok(Expression::Str(StrLit {
                value: lit.value,
                position: lit.position,
                info: Type::Str,
            })),
            Expression::Char(lit) => Ok(Expression::Char(CharLit {
                value: lit.value,
                position: lit.position,
                info: Type::Char,
            })),
            Expression::Bool(lit) => Ok(Expression::Bool(BoolLit {
                value: lit.value,
                position: lit.position,
                info: Type::Bool,
            })),
            Expression::Unit(lit) => Ok(Expression::Unit(UnitLit {
                position: lit.position,
                info: Type::Unit,
            })),

            Expression::Ident(ident) => {
                let ty = self.lookup_name(&ident.name, &ident.position)?;
                Ok(Expression::Ident(Ident {
                    name: ident.name,
                    position: ident.position,
                    info: ty,
                }))
            }

            Expression::Binary(binary) => {
                let lhs = self.infer_expr(*binary.lhs)?;
                let rhs = self.infer_expr(*binary.rhs)?;
                let info = match binary_op_class(&binary.op) {
                    OpClass::Arithmetic => {
                        // Arithmetic operands must agree and default to i32.
                        self.constrain(
                            lhs.ty().clone(),
                            rhs.ty().clone(),
                            binary.position.clone(),
                        );
                        self.constrain(lhs.ty().clone(), Type::Int32, binary.position.clone());
                        lhs.ty().clone()
                    }
                    OpClass::Comparison => Type::Bool,
                    OpClass::Boolean => {
                        self.constrain(lhs.ty().clone(), Type::Bool, lhs.position());
                        self.constrain(rhs.ty().clone(), Type::Bool, rhs.position());
                        Type::Bool
                    }
                    OpClass::User => {
                        let op_ty = self.lookup_name(&binary.op, &binary.position)?;
                        let result = Type::Var(self.fresh());
                        self.constrain(
                            op_ty,
                            Type::func(
                                vec![lhs.ty().clone(), rhs.ty().clone()],
                                result.clone(),
                            ),
                            binary.position.clone(),
                        );
                        result
                    }
                };
                Ok(Expression::Binary(Binary {
                    op: binary.op,
                    lhs: Box::new(lhs),
                    rhs: Box::new(rhs),
                    position: binary.position,
                    info,
                }))
            }

            Expression::Unary(unary) => {
                let operand = self.infer_expr(*unary.operand)?;
                let op_ty = self.lookup_name(&unary.op, &unary.position)?;
                let result = Type::Var(self.fresh());
                self.constrain(
                    op_ty,
                    Type::func(vec![operand.ty().clone()], result.clone()),
                    unary.position.clone(),
                );
                Ok(Expression::Unary(Unary {
                    op: unary.op,
                    operand: Box::new(operand),
                    position: unary.position,
                    info: result,
                }))
            }

            Expression::Call(call) => {
                let func = self.infer_expr(*call.func)?;
                let args = call
                    .args
                    .into_iter()
                    .map(|arg| self.infer_expr(arg))
                    .collect::<Result<Vec<_>, _>>()?;
                let result = Type::Var(self.fresh());
                self.constrain(
                    func.ty().clone(),
                    Type::func(args.iter().map(|a| a.ty().clone()).collect(), result.clone()),
                    call.position.clone(),
                );
                Ok(Expression::Call(Call {
                    func: Box::new(func),
                    args,
                    position: call.position,
                    info: result,
                }))
            }

            Expression::If(if_expr) => {
                let condition = self.infer_expr(*if_expr.condition)?;
                let then_branch = self.infer_expr(*if_expr.then_branch)?;
                let else_branch = self.infer_expr(*if_expr.else_branch)?;
                self.constrain(condition.ty().clone(), Type::Bool, condition.position());
                self.constrain(
                    then_branch.ty().clone(),
                    else_branch.ty().clone(),
                    if_expr.position.clone(),
                );
                let info = then_branch.ty().clone();
                Ok(Expression::If(If {
                    condition: Box::new(condition),
                    then_branch: Box::new(then_branch),
                    else_branch: Box::new(else_branch),
                    position: if_expr.position,
                    info,
                }))
            }

            Expression::Match(match_expr) => {
                let scrutinee = self.infer_expr(*match_expr.scrutinee)?;
                let mut arms = match_expr.arms.into_iter();
                let Some(first) = arms.next() else {
                    return Err(TypeError::EmptyMatch {
                        span: match_expr.position,
                    });
                };
                let first = self.infer_arm(scrutinee.ty().clone(), first)?;
                let result_ty = first.body.ty().clone();
                let mut typed_arms = vec![first];
                for arm in arms {
                    let typed = self.infer_arm(scrutinee.ty().clone(), arm)?;
                    self.constrain(
                        result_ty.clone(),
                        typed.body.ty().clone(),
                        typed.position.clone(),
                    );
                    typed_arms.push(typed);
                }
                Ok(Expression::Match(Match {
                    scrutinee: Box::new(scrutinee),
                    arms: typed_arms,
                    position: match_expr.position,
                    info: result_ty,
                }))
            }

            Expression::Block(block) => self.scoped(|me| {
                let mut statements = Vec::new();
                for statement in block.statements {
                    statements.push(me.infer_statement(statement)?);
                }
                let info = match statements.last() {
                    Some(Statement::Expression(e)) => e.ty().clone(),
                    _ => Type::Unit,
                };
                Ok(Expression::Block(Block {
                    statements,
                    position: block.position,
                    info,
                }))
            }),

            Expression::Assign(assign) => {
                let target = self.infer_expr(*assign.target)?;
                match &target {
                    Expression::Ident(ident) => {
                        let mutable = self
                            .env
                            .lookup(&ident.name)
                            .map(|binding| binding.mutable)
                            .unwrap_or(false);
                        if !mutable {
                            return Err(TypeError::ImmutableAssign {
                                name: ident.name.clone(),
                                span: ident.position.clone(),
                            });
                        }
                    }
                    // Mutability of the pointee is not tracked; any
                    // dereference is assignable.
                    Expression::Deref(_) => {}
                    _ => {
                        return Err(TypeError::NonLValue {
                            span: assign.position,
                        });
                    }
                }
                let value = self.infer_expr(*assign.value)?;
                self.constrain(
                    target.ty().clone(),
                    value.ty().clone(),
                    assign.position.clone(),
                );
                let info = target.ty().clone();
                Ok(Expression::Assign(Assign {
                    target: Box::new(target),
                    value: Box::new(value),
                    position: assign.position,
                    info,
                }))
            }

            Expression::Ref(ref_expr) => {
                let operand = self.infer_expr(*ref_expr.operand)?;
                if !matches!(operand, Expression::Ident(_)) {
                    return Err(TypeError::NonReferencable {
                        span: ref_expr.position,
                    });
                }
                let info = Type::ptr(operand.ty().clone());
                Ok(Expression::Ref(Ref {
                    operand: Box::new(operand),
                    position: ref_expr.position,
                    info,
                }))
            }

            Expression::Deref(deref) => {
                let operand = self.infer_expr(*deref.operand)?;
                let result = Type::Var(self.fresh());
                self.constrain(
                    operand.ty().clone(),
                    Type::ptr(result.clone()),
                    deref.position.clone(),
                );
                Ok(Expression::Deref(Deref {
                    operand: Box::new(operand),
                    position: deref.position,
                    info: result,
                }))
            }

            Expression::Cast(cast) => {
                let operand = self.infer_expr(*cast.operand)?;
                let info = cast.target.clone();
                Ok(Expression::Cast(Cast {
                    operand: Box::new(operand),
                    target: cast.target,
                    position: cast.position,
                    info,
                }))
            }

            Expression::Sizeof(sizeof) => Ok(Expression::Sizeof(Sizeof {
                target: sizeof.target,
                position: sizeof.position,
                info: Type::Int32,
            })),

            Expression::Closure(closure) => Err(TypeError::NotImplemented {
                feature: "closures",
                span: closure.position,
            }),
        }
    }

    fn infer_arm(
        &mut self,
        scrutinee_ty: Type,
        arm: MatchArm<()>,
    ) -> Result<MatchArm<Type>, TypeError> {
        let (pattern, pattern_ty, bindings) = self.infer_pattern(arm.pattern)?;
        self.constrain(scrutinee_ty, pattern_ty, arm.position.clone());
        let body = self.scoped(|me| {
            for (name, ty) in bindings {
                me.env
                    .insert(name, Binding::immutable(TypeScheme::monomorphic(ty)));
            }
            me.infer_expr(arm.body)
        })?;
        Ok(MatchArm {
            pattern,
            body,
            position: arm.position,
        })
    }

    // ── Statements ─────────────────────────────────────────────────────

    fn infer_statement(
        &mut self,
        statement: Statement<()>,
    ) -> Result<Statement<Type>, TypeError> {
        match statement {
            Statement::Decl(decl) => {
                let value = self.infer_expr(*decl.value)?;
                let ty = value.ty().clone();
                self.env.insert(
                    decl.name.name.clone(),
                    Binding::new(TypeScheme::monomorphic(ty.clone()), decl.mutable),
                );
                Ok(Statement::Decl(VarDecl {
                    name: Ident {
                        name: decl.name.name,
                        position: decl.name.position,
                        info: ty,
                    },
                    mutable: decl.mutable,
                    value: Box::new(value),
                    position: decl.position,
                }))
            }
            Statement::While(while_stmt) => {
                let condition = self.infer_expr(*while_stmt.condition)?;
                self.constrain(condition.ty().clone(), Type::Bool, condition.position());
                let body = self.infer_expr(*while_stmt.body)?;
                Ok(Statement::While(While {
                    condition: Box::new(condition),
                    body: Box::new(body),
                    position: while_stmt.position,
                }))
            }
            Statement::Return(ret) => {
                let value = match ret.value {
                    Some(value) => Some(Box::new(self.infer_expr(*value)?)),
                    None => None,
                };
                Ok(Statement::Return(Return {
                    value,
                    position: ret.position,
                }))
            }
            Statement::Expression(expr) => Ok(Statement::Expression(self.infer_expr(expr)?)),
        }
    }

    // ── Patterns ───────────────────────────────────────────────────────

    /// Infer a pattern's type and collect the bindings it introduces. The
    /// bindings become immutable locals in the arm body's scope.
    fn infer_pattern(
        &mut self,
        pattern: Pattern<()>,
    ) -> Result<(Pattern<Type>, Type, Vec<(Name, Type)>), TypeError> {
        match pattern {
            Pattern::Ident(ident) => {
                let ty = Type::Var(self.fresh());
                let bindings = vec![(ident.name.clone(), ty.clone())];
                Ok((
                    Pattern::Ident(Ident {
                        name: ident.name,
                        position: ident.position,
                        info: ty.clone(),
                    }),
                    ty,
                    bindings,
                ))
            }
            Pattern::Literal(lit) => {
                let ty = match &lit {
                    LiteralPattern::Integer(..) => Type::Int32,
                    LiteralPattern::Str(..) => Type::Str,
                    LiteralPattern::Char(..) => Type::Char,
                    LiteralPattern::Boolean(..) => Type::Bool,
                    LiteralPattern::Unit(..) => Type::Unit,
                };
                Ok((
                    Pattern::Literal(lit.map_info(&mut |_| ty.clone())),
                    ty,
                    Vec::new(),
                ))
            }
            Pattern::Wildcard(wildcard) => {
                let ty = Type::Var(self.fresh());
                Ok((
                    Pattern::Wildcard(Wildcard {
                        position: wildcard.position,
                        info: ty.clone(),
                    }),
                    ty,
                    Vec::new(),
                ))
            }
            Pattern::Constructor(con) => {
                let con_ty = self.lookup_name(&con.name, &con.position)?;
                let result = Type::Var(self.fresh());
                if con.bindings.is_empty() {
                    self.constrain(result.clone(), con_ty, con.position.clone());
                    Ok((
                        Pattern::Constructor(ConstructorPattern {
                            name: con.name,
                            bindings: Vec::new(),
                            position: con.position,
                            info: result.clone(),
                        }),
                        result,
                        Vec::new(),
                    ))
                } else {
                    let binding_vars: Vec<Type> = con
                        .bindings
                        .iter()
                        .map(|_| Type::Var(self.fresh()))
                        .collect();
                    self.constrain(
                        Type::func(binding_vars.clone(), result.clone()),
                        con_ty,
                        con.position.clone(),
                    );
                    let mut bindings = Vec::new();
                    let mut typed_idents = Vec::new();
                    for (ident, ty) in con.bindings.into_iter().zip(binding_vars) {
                        bindings.push((ident.name.clone(), ty.clone()));
                        typed_idents.push(Ident {
                            name: ident.name,
                            position: ident.position,
                            info: ty,
                        });
                    }
                    Ok((
                        Pattern::Constructor(ConstructorPattern {
                            name: con.name,
                            bindings: typed_idents,
                            position: con.position,
                            info: result.clone(),
                        }),
                        result,
                        bindings,
                    ))
                }
            }
        }
    }
}

impl Default for Inferrer {
    fn default() -> Self {
        Self::new()
    }
}

/// Collect the type and span of every `return` statement in a typed body.
fn collect_returns(expr: &Expression<Type>, out: &mut Vec<(Type, Span)>) {
    match expr {
        Expression::Integer(_)
        | Expression::Float(_)
        | Expression::Str(_)
        | Expression::Char(_)
        | Expression::Bool(_)
        | Expression::Unit(_)
        | Expression::Ident(_)
        | Expression::Sizeof(_) => {}
        Expression::Binary(e) => {
            collect_returns(&e.lhs, out);
            collect_returns(&e.rhs, out);
        }
        Expression::Unary(e) => collect_returns(&e.operand, out),
        Expression::Call(e) => {
            collect_returns(&e.func, out);
            for arg in &e.args {
                collect_returns(arg, out);
            }
        }
        Expression::If(e) => {
            collect_returns(&e.condition, out);
            collect_returns(&e.then_branch, out);
            collect_returns(&e.else_branch, out);
        }
        Expression::Match(e) => {
            collect_returns(&e.scrutinee, out);
            for arm in &e.arms {
                collect_returns(&arm.body, out);
            }
        }
        Expression::Block(e) => {
            for statement in &e.statements {
                collect_returns_statement(statement, out);
            }
        }
        Expression::Assign(e) => {
            collect_returns(&e.target, out);
            collect_returns(&e.value, out);
        }
        Expression::Ref(e) => collect_returns(&e.operand, out),
        Expression::Deref(e) => collect_returns(&e.operand, out),
        Expression::Cast(e) => collect_returns(&e.operand, out),
        Expression::Closure(e) => collect_returns(&e.body, out),
    }
}

fn collect_returns_statement(statement: &Statement<Type>, out: &mut Vec<(Type, Span)>) {
    match statement {
        Statement::Decl(decl) => collect_returns(&decl.value, out),
        Statement::While(while_stmt) => {
            collect_returns(&while_stmt.condition, out);
            collect_returns(&while_stmt.body, out);
        }
        Statement::Return(ret) => match &ret.value {
            Some(value) => {
                collect_returns(value, out);
                out.push((value.ty().clone(), ret.position.clone()));
            }
            None => out.push((Type::Unit, ret.position.clone())),
        },
        Statement::Expression(expr) => collect_returns(expr, out),
    }
}
