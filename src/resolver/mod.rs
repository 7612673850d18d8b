//! # Name Resolution
//!
//! Two passes over the whole program.
//!
//! **Pass 0** seeds the global name set with the fully qualified name of
//! every top-level across every module (functions, operators, type
//! definitions, constructors, externs) together with its visibility, and
//! records each module's import list. Seeding everything up front is what
//! makes mutual recursion and forward references across modules work.
//!
//! **Pass 1** walks each module and rewrites every identifier to its
//! qualified form. Binding introductions (parameters, local declarations,
//! pattern bindings) are qualified by the current scope path and inserted
//! into the name set; anonymous blocks and match arms synthesize fresh
//! scope segments (`_a`, `_b`, ...) so their locals cannot collide.
//!
//! A use site `x` resolves by walking the local scope path from the
//! innermost prefix outwards, looking for `cur_mod::<prefix>::x`. If no
//! prefix matches, the module's imports are consulted - direct imports plus
//! everything re-exported through public imports - keeping only names
//! flagged public. No candidate is an error, several are an error, exactly
//! one rewrites the use site.
//!
//! The resolver halts at the first error; inference never sees an
//! unresolved program.

use std::collections::{HashMap, HashSet};

use lachs::Span;

use crate::ast::expression::{Expression, Ident};
use crate::ast::name::Name;
use crate::ast::pattern::Pattern;
use crate::ast::statement::Statement;
use crate::ast::{ExternDecl, Import, Module, Param, Program, TopLevel, TypeDef};
use crate::types::ty::{Type, TypeVar, alpha_id};

pub mod error;
mod imports;

pub use error::ResolveError;

/// Operator symbols the language builds in; they are typed structurally by
/// the inferrer and never looked up.
const BUILTIN_OPERATORS: &[&str] = &[
    "+", "-", "*", "/", "==", "!=", "<", ">", "<=", ">=", "&&", "||",
];

fn is_builtin_operator(name: &Name) -> bool {
    matches!(name, Name::Unqualified(symbol) if BUILTIN_OPERATORS.contains(&symbol.as_str()))
}

/// Resolve every name in the program, rewriting the tree in place.
pub fn resolve(mut program: Program<()>) -> Result<Program<()>, ResolveError> {
    let mut resolver = Resolver::new();
    resolver.seed(&program);
    for module in &mut program.modules {
        resolver.resolve_module(module)?;
    }
    Ok(program)
}

pub struct Resolver {
    /// Every qualified top-level and every local binding introduced so far.
    name_set: HashSet<Name>,
    /// Visibility per qualified top-level name.
    pub_map: HashMap<Name, bool>,
    /// Qualified top-levels already defined; duplicates are diagnosed here.
    extra_set: HashSet<Name>,
    /// Declared imports per module full path.
    imports_map: HashMap<Vec<String>, Vec<Import>>,
    /// Memoized public re-export closures.
    import_memo: HashMap<Vec<String>, Vec<Vec<String>>>,
    /// Full path of the module currently being resolved.
    cur_mod: Vec<String>,
    /// Per-module counter for synthesized anonymous scope segments.
    tmp_scope_count: usize,
    /// The nested scope path within the current top-level.
    local_scope: Vec<String>,
}

impl Resolver {
    pub fn new() -> Self {
        Resolver {
            name_set: HashSet::new(),
            pub_map: HashMap::new(),
            extra_set: HashSet::new(),
            imports_map: HashMap::new(),
            import_memo: HashMap::new(),
            cur_mod: Vec::new(),
            tmp_scope_count: 0,
            local_scope: Vec::new(),
        }
    }

    // ── Pass 0 ─────────────────────────────────────────────────────────

    fn seed(&mut self, program: &Program<()>) {
        for module in &program.modules {
            let full = module.full_path();
            self.imports_map.insert(full.clone(), module.imports.clone());
            for top_level in &module.top_levels {
                match top_level {
                    TopLevel::Function(func) => {
                        self.seed_top_level(&full, func.name.name.base(), func.public);
                    }
                    TopLevel::Operator(op) => {
                        self.seed_top_level(&full, op.symbol.name.base(), op.public);
                    }
                    TopLevel::TypeDef(def) => {
                        self.seed_top_level(&full, def.name.base(), def.public);
                        // Constructors inherit their type's visibility.
                        for constructor in &def.constructors {
                            self.seed_top_level(&full, constructor.name.base(), def.public);
                        }
                    }
                    TopLevel::Extern(ext) => {
                        // Extern declarations are module-local.
                        self.seed_top_level(&full, ext.name.base(), false);
                    }
                }
            }
        }
    }

    fn seed_top_level(&mut self, module: &[String], base: &str, public: bool) {
        let name = Name::qualified(module.to_vec(), base);
        self.name_set.insert(name.clone());
        self.pub_map.insert(name, public);
    }

    // ── Pass 1 ─────────────────────────────────────────────────────────

    fn resolve_module(&mut self, module: &mut Module<()>) -> Result<(), ResolveError> {
        self.cur_mod = module.full_path();
        self.tmp_scope_count = 0;
        self.local_scope.clear();
        log::debug!("resolving module {}", self.cur_mod.join("::"));
        for top_level in &mut module.top_levels {
            match top_level {
                TopLevel::Function(func) => {
                    let position = func.position.clone();
                    self.resolve_callable(
                        &mut func.name,
                        &mut func.params,
                        &mut func.ret_annotation,
                        &mut func.body,
                        &position,
                    )?;
                }
                TopLevel::Operator(op) => {
                    let position = op.position.clone();
                    self.resolve_callable(
                        &mut op.symbol,
                        &mut op.params,
                        &mut op.ret_annotation,
                        &mut op.body,
                        &position,
                    )?;
                }
                TopLevel::TypeDef(def) => self.resolve_type_def(def)?,
                TopLevel::Extern(ext) => self.resolve_extern(ext)?,
            }
        }
        Ok(())
    }

    fn resolve_callable(
        &mut self,
        name: &mut Ident<()>,
        params: &mut [Param<()>],
        ret_annotation: &mut Option<Type>,
        body: &mut Expression<()>,
        position: &Span,
    ) -> Result<(), ResolveError> {
        let qualified = Name::qualified(self.cur_mod.clone(), name.name.base());
        if !self.extra_set.insert(qualified.clone()) {
            return Err(ResolveError::redefinition(qualified, name.position.clone()));
        }
        let segment = name.name.base().to_string();
        name.name = qualified;
        if let Some(annotation) = ret_annotation {
            self.resolve_type(annotation, position, None)?;
        }
        self.with_scope(segment, |resolver| {
            for param in params.iter_mut() {
                resolver.declare_local(&mut param.name)?;
                if let Some(annotation) = &mut param.annotation {
                    resolver.resolve_type(annotation, &param.position, None)?;
                }
            }
            resolver.resolve_expression(body)
        })
    }

    fn resolve_type_def(&mut self, def: &mut TypeDef) -> Result<(), ResolveError> {
        let qualified = Name::qualified(self.cur_mod.clone(), def.name.base());
        if !self.extra_set.insert(qualified.clone()) {
            return Err(ResolveError::redefinition(qualified, def.position.clone()));
        }
        def.name = qualified;
        let type_params = def.params.clone();
        for constructor in &mut def.constructors {
            constructor.name = Name::qualified(self.cur_mod.clone(), constructor.name.base());
            for arg in &mut constructor.args {
                self.resolve_type(arg, &constructor.position, Some(&type_params))?;
            }
        }
        Ok(())
    }

    fn resolve_extern(&mut self, ext: &mut ExternDecl) -> Result<(), ResolveError> {
        ext.name = Name::qualified(self.cur_mod.clone(), ext.name.base());
        for param in &mut ext.params {
            self.resolve_type(param, &ext.position, None)?;
        }
        self.resolve_type(&mut ext.ret, &ext.position, None)
    }

    // ── Scope helpers ──────────────────────────────────────────────────

    /// Run `f` with `segment` pushed onto the local scope path, popping it
    /// again on every exit path.
    fn with_scope<R>(
        &mut self,
        segment: String,
        f: impl FnOnce(&mut Self) -> Result<R, ResolveError>,
    ) -> Result<R, ResolveError> {
        self.local_scope.push(segment);
        let result = f(self);
        self.local_scope.pop();
        result
    }

    /// Synthesize a fresh anonymous scope segment.
    fn tmp_scope(&mut self) -> String {
        let segment = alpha_id(self.tmp_scope_count);
        self.tmp_scope_count += 1;
        segment
    }

    /// Qualify `base` by the current module and scope path.
    fn qualify_local(&self, base: &str) -> Name {
        let mut path = self.cur_mod.clone();
        path.extend(self.local_scope.iter().cloned());
        Name::qualified(path, base)
    }

    /// Introduce a binding in the current scope, rewriting its identifier
    /// to the qualified form. A second introduction of the same name in the
    /// exact same scope is a redefinition.
    fn declare_local(&mut self, ident: &mut Ident<()>) -> Result<(), ResolveError> {
        let qualified = self.qualify_local(ident.name.base());
        if !self.name_set.insert(qualified.clone()) {
            return Err(ResolveError::redefinition(
                qualified,
                ident.position.clone(),
            ));
        }
        ident.name = qualified;
        Ok(())
    }

    // ── Use sites ──────────────────────────────────────────────────────

    fn resolve_use_site(&mut self, name: &mut Name, span: &Span) -> Result<(), ResolveError> {
        match name {
            // Pre-qualified names only need to exist.
            Name::Qualified { .. } => {
                if self.name_set.contains(name) {
                    Ok(())
                } else {
                    Err(ResolveError::undefined(name.clone(), span.clone()))
                }
            }
            Name::Unqualified(base) => {
                let base = base.clone();
                match self.find_unqualified(&base, span)? {
                    Some(resolved) => {
                        log::trace!("resolved {} -> {}", base, resolved);
                        *name = resolved;
                        Ok(())
                    }
                    None => Err(ResolveError::undefined(
                        Name::unqualified(base),
                        span.clone(),
                    )),
                }
            }
        }
    }

    /// Find the unique resolution of an unqualified name, or `None` when
    /// nothing matches. Ambiguity between import candidates is an error.
    fn find_unqualified(
        &mut self,
        base: &str,
        span: &Span,
    ) -> Result<Option<Name>, ResolveError> {
        // Local scope, innermost prefix first, down to the bare module.
        for prefix_len in (0..=self.local_scope.len()).rev() {
            let mut path = self.cur_mod.clone();
            path.extend(self.local_scope[..prefix_len].iter().cloned());
            let candidate = Name::qualified(path, base);
            if self.name_set.contains(&candidate) {
                return Ok(Some(candidate));
            }
        }
        // Imported modules; only public names are visible.
        let mut candidates = Vec::new();
        let visible =
            imports::visible_imports(&self.imports_map, &mut self.import_memo, &self.cur_mod);
        for import_path in visible {
            let candidate = Name::qualified(import_path, base);
            if self.name_set.contains(&candidate)
                && self.pub_map.get(&candidate).copied().unwrap_or(false)
                && !candidates.contains(&candidate)
            {
                candidates.push(candidate);
            }
        }
        match candidates.len() {
            0 => Ok(None),
            1 => Ok(candidates.pop()),
            _ => Err(ResolveError::ambiguous(
                Name::unqualified(base),
                candidates,
                span.clone(),
            )),
        }
    }

    // ── Types ──────────────────────────────────────────────────────────

    /// Resolve a type annotation. Base type names short-circuit and
    /// normalize to their dedicated representations. Inside a type
    /// definition (`type_params` present), names matching a parameter
    /// become type variables, and an unknown nullary name is taken as a
    /// type variable as well - the inferrer checks it against the
    /// parameter list.
    fn resolve_type(
        &mut self,
        ty: &mut Type,
        span: &Span,
        type_params: Option<&[String]>,
    ) -> Result<(), ResolveError> {
        match ty {
            Type::Int32
            | Type::Float64
            | Type::Str
            | Type::Char
            | Type::Bool
            | Type::Unit
            | Type::Var(_) => Ok(()),
            Type::Con(name, args) => {
                if !name.is_qualified() && args.is_empty() {
                    let base = name.base().to_string();
                    if let Some(params) = type_params {
                        if params.iter().any(|p| *p == base) {
                            *ty = Type::Var(TypeVar::new(base));
                            return Ok(());
                        }
                    }
                    if let Some(base_ty) = Type::from_base_name(&base) {
                        *ty = base_ty;
                        return Ok(());
                    }
                    match self.find_unqualified(&base, span)? {
                        Some(resolved) => {
                            *name = resolved;
                        }
                        None if type_params.is_some() => {
                            *ty = Type::Var(TypeVar::new(base));
                        }
                        None => {
                            return Err(ResolveError::undefined(
                                Name::unqualified(base),
                                span.clone(),
                            ));
                        }
                    }
                    return Ok(());
                }
                self.resolve_use_site(name, span)?;
                for arg in args {
                    self.resolve_type(arg, span, type_params)?;
                }
                Ok(())
            }
            Type::Func(params, ret) => {
                for param in params {
                    self.resolve_type(param, span, type_params)?;
                }
                self.resolve_type(ret, span, type_params)
            }
            Type::Ptr(inner) => self.resolve_type(inner, span, type_params),
        }
    }

    // ── Expressions ────────────────────────────────────────────────────

    fn resolve_expression(&mut self, expr: &mut Expression<()>) -> Result<(), ResolveError> {
        match expr {
            Expression::Integer(_)
            | Expression::Float(_)
            | Expression::Str(_)
            | Expression::Char(_)
            | Expression::Bool(_)
            | Expression::Unit(_) => Ok(()),

            Expression::Ident(ident) => {
                let span = ident.position.clone();
                self.resolve_use_site(&mut ident.name, &span)
            }

            Expression::Binary(binary) => {
                if !is_builtin_operator(&binary.op) {
                    let span = binary.position.clone();
                    self.resolve_use_site(&mut binary.op, &span)?;
                }
                self.resolve_expression(&mut binary.lhs)?;
                self.resolve_expression(&mut binary.rhs)
            }

            Expression::Unary(unary) => {
                let span = unary.position.clone();
                self.resolve_use_site(&mut unary.op, &span)?;
                self.resolve_expression(&mut unary.operand)
            }

            Expression::Call(call) => {
                self.resolve_expression(&mut call.func)?;
                for arg in &mut call.args {
                    self.resolve_expression(arg)?;
                }
                Ok(())
            }

            Expression::If(if_expr) => {
                self.resolve_expression(&mut if_expr.condition)?;
                self.resolve_expression(&mut if_expr.then_branch)?;
                self.resolve_expression(&mut if_expr.else_branch)
            }

            Expression::Match(match_expr) => {
                self.resolve_expression(&mut match_expr.scrutinee)?;
                for arm in &mut match_expr.arms {
                    let segment = self.tmp_scope();
                    self.with_scope(segment, |resolver| {
                        resolver.resolve_pattern(&mut arm.pattern)?;
                        resolver.resolve_expression(&mut arm.body)
                    })?;
                }
                Ok(())
            }

            Expression::Block(block) => {
                let segment = self.tmp_scope();
                self.with_scope(segment, |resolver| {
                    for statement in &mut block.statements {
                        resolver.resolve_statement(statement)?;
                    }
                    Ok(())
                })
            }

            Expression::Assign(assign) => {
                self.resolve_expression(&mut assign.target)?;
                self.resolve_expression(&mut assign.value)
            }

            Expression::Ref(ref_expr) => self.resolve_expression(&mut ref_expr.operand),
            Expression::Deref(deref) => self.resolve_expression(&mut deref.operand),

            Expression::Cast(cast) => {
                self.resolve_expression(&mut cast.operand)?;
                let span = cast.position.clone();
                self.resolve_type(&mut cast.target, &span, None)
            }

            Expression::Sizeof(sizeof) => {
                let span = sizeof.position.clone();
                self.resolve_type(&mut sizeof.target, &span, None)
            }

            Expression::Closure(closure) => {
                let segment = self.tmp_scope();
                self.with_scope(segment, |resolver| {
                    for param in &mut closure.params {
                        resolver.declare_local(&mut param.name)?;
                        if let Some(annotation) = &mut param.annotation {
                            resolver.resolve_type(annotation, &param.position, None)?;
                        }
                    }
                    resolver.resolve_expression(&mut closure.body)
                })
            }
        }
    }

    fn resolve_statement(&mut self, statement: &mut Statement<()>) -> Result<(), ResolveError> {
        match statement {
            Statement::Decl(decl) => {
                // The initializer cannot see the name it initializes.
                self.resolve_expression(&mut decl.value)?;
                self.declare_local(&mut decl.name)
            }
            Statement::While(while_stmt) => {
                self.resolve_expression(&mut while_stmt.condition)?;
                self.resolve_expression(&mut while_stmt.body)
            }
            Statement::Return(ret) => match &mut ret.value {
                Some(value) => self.resolve_expression(value),
                None => Ok(()),
            },
            Statement::Expression(expr) => self.resolve_expression(expr),
        }
    }

    fn resolve_pattern(&mut self, pattern: &mut Pattern<()>) -> Result<(), ResolveError> {
        match pattern {
            Pattern::Literal(_) | Pattern::Wildcard(_) => Ok(()),
            Pattern::Ident(ident) => self.declare_local(ident),
            Pattern::Constructor(con) => {
                let span = con.position.clone();
                self.resolve_use_site(&mut con.name, &span)?;
                for binding in &mut con.bindings {
                    self.declare_local(binding)?;
                }
                Ok(())
            }
        }
    }
}

impl Default for Resolver {
    fn default() -> Self {
        Self::new()
    }
}
