use crate::error::EvalError;
use crate::value::Value;
use std::fmt;
use std::rc::Rc;

/// Persistent name-to-value chain.
///
/// Extending never touches an existing frame: the new head shares its
/// parent, so sibling scopes (and the closures that captured them) keep
/// seeing exactly the bindings they were built with.
#[derive(Clone, Default)]
pub struct Env {
    head: Option<Rc<Frame>>,
}

struct Frame {
    name: String,
    value: Value,
    parent: Env,
}

impl Env {
    pub fn empty() -> Self {
        Env { head: None }
    }

    /// Innermost binding of `name` wins.
    pub fn lookup(&self, name: &str) -> Result<Value, EvalError> {
        let mut cur = self.head.as_deref();
        while let Some(frame) = cur {
            if frame.name == name {
                return Ok(frame.value.clone());
            }
            cur = frame.parent.head.as_deref();
        }
        Err(EvalError::UnboundVariable(name.to_string()))
    }

    pub fn extend(&self, name: impl Into<String>, value: Value) -> Env {
        Env {
            head: Some(Rc::new(Frame {
                name: name.into(),
                value,
                parent: self.clone(),
            })),
        }
    }

    /// Same chain, not merely the same bindings.
    pub fn ptr_eq(&self, other: &Env) -> bool {
        match (&self.head, &other.head) {
            (Some(a), Some(b)) => Rc::ptr_eq(a, b),
            (None, None) => true,
            _ => false,
        }
    }

    fn names(&self) -> impl Iterator<Item = &str> {
        let mut cur = self.head.as_deref();
        std::iter::from_fn(move || {
            let frame = cur?;
            cur = frame.parent.head.as_deref();
            Some(frame.name.as_str())
        })
    }
}

// A chain of closures, each captured in the environment of the next, would
// otherwise free one link per native stack frame. Frames and closures that
// are still shared elsewhere are left to their other owners.
impl Drop for Env {
    fn drop(&mut self) {
        let mut pending: Vec<Rc<Frame>> = self.head.take().into_iter().collect();
        while let Some(frame) = pending.pop() {
            let Ok(mut frame) = Rc::try_unwrap(frame) else {
                continue;
            };
            pending.extend(frame.parent.head.take());
            let value = std::mem::replace(&mut frame.value, Value::Boolean(false));
            if let Value::Closure(closure) = value {
                if let Ok(mut closure) = Rc::try_unwrap(closure) {
                    pending.extend(closure.env.head.take());
                }
            }
        }
    }
}

// Values can hold closures whose environments hold more closures; printing
// names only keeps the output finite and readable.
impl fmt::Debug for Env {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.names()).finish()
    }
}
