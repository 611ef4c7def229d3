//! Object handles.
//!
//! A collection element may be a shared, mutable handle to a user type that
//! implements [`Model`]. Handles compare strictly by identity: two handles are
//! the same element only when they point at the same allocation. Every
//! snapshot and derived collection holding a handle sees the same object, so
//! mutations made through one (for example by a batch `fill_all`) are visible
//! through all of them.

use crate::array::Array;
use crate::value::Value;
use std::any::Any;
use std::cell::{Ref, RefCell, RefMut};
use std::fmt;
use std::rc::Rc;

/// Upcast to [`Any`], implemented for every `'static` type.
pub trait AsAny: Any {
    fn as_any(&self) -> &dyn Any;
    fn as_any_mut(&mut self) -> &mut dyn Any;
}

impl<T: Any> AsAny for T {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

/// A user type that can live inside a collection as an object handle.
///
/// Only [`attributes`](Model::attributes) is required. A model is traversable
/// by default: used as a source, or flattened by `collapse`, it yields its
/// attributes. Return `None` from [`traverse`](Model::traverse) to make it
/// opaque.
pub trait Model: AsAny + fmt::Debug {
    /// Display name, used in error messages and text conversion.
    fn type_name(&self) -> &str {
        short_type_name(std::any::type_name::<Self>())
    }

    /// All named attributes in declaration order.
    fn attributes(&self) -> Array;

    fn attribute(&self, name: &str) -> Option<Value> {
        self.attributes().get(name).cloned()
    }

    /// The pairs this object yields when iterated, if it is iterable at all.
    fn traverse(&self) -> Option<Array> {
        Some(self.attributes())
    }

    /// Export as a plain array.
    ///
    /// `fields` limits the exported attributes (empty means all). `expand`
    /// names extra fields a model may add; the default export has none.
    /// With `recursive`, objects anywhere below the top level, including
    /// inside nested arrays, are exported as arrays as well.
    fn to_array(&self, fields: &[String], _expand: &[String], recursive: bool) -> Array {
        self.attributes()
            .into_iter()
            .filter(|(k, _)| fields.is_empty() || fields.iter().any(|f| *f == k.to_string()))
            .map(|(k, v)| (k, if recursive { export_nested(v) } else { v }))
            .collect()
    }
}

fn export_nested(v: Value) -> Value {
    match v {
        Value::Object(o) => Value::Array(o.to_array(&[], &[], true)),
        Value::Array(a) => Value::Array(a.into_iter().map(|(k, v)| (k, export_nested(v))).collect()),
        other => other,
    }
}

pub(crate) fn short_type_name(full: &str) -> &str {
    let base = full.split('<').next().unwrap_or(full);
    base.rsplit("::").next().unwrap_or(base)
}

/// Shared handle to a [`Model`].
#[derive(Clone)]
pub struct Object(Rc<RefCell<dyn Model>>);

impl Object {
    pub fn new<M: Model>(model: M) -> Self {
        Object(Rc::new(RefCell::new(model)))
    }

    pub fn borrow(&self) -> Ref<'_, dyn Model> {
        self.0.borrow()
    }

    pub fn borrow_mut(&self) -> RefMut<'_, dyn Model> {
        self.0.borrow_mut()
    }

    /// True if the handle points at an `M`.
    pub fn is<M: Model>(&self) -> bool {
        let model = self.0.borrow();
        let model: &dyn Model = &*model;
        model.as_any().is::<M>()
    }

    pub fn downcast_ref<M: Model>(&self) -> Option<Ref<'_, M>> {
        Ref::filter_map(self.0.borrow(), |m| m.as_any().downcast_ref::<M>()).ok()
    }

    pub fn downcast_mut<M: Model>(&self) -> Option<RefMut<'_, M>> {
        RefMut::filter_map(self.0.borrow_mut(), |m| {
            m.as_any_mut().downcast_mut::<M>()
        })
        .ok()
    }

    /// Identity comparison.
    pub fn ptr_eq(&self, other: &Object) -> bool {
        std::ptr::addr_eq(Rc::as_ptr(&self.0), Rc::as_ptr(&other.0))
    }

    pub fn type_name(&self) -> String {
        match self.0.try_borrow() {
            Ok(m) => m.type_name().to_string(),
            Err(_) => "object".to_string(),
        }
    }

    pub fn attributes(&self) -> Array {
        self.0.borrow().attributes()
    }

    pub fn attribute(&self, name: &str) -> Option<Value> {
        self.0.borrow().attribute(name)
    }

    pub fn traverse(&self) -> Option<Array> {
        self.0.borrow().traverse()
    }

    pub fn is_traversable(&self) -> bool {
        self.traverse().is_some()
    }

    pub fn to_array(&self, fields: &[String], expand: &[String], recursive: bool) -> Array {
        self.0.borrow().to_array(fields, expand, recursive)
    }
}

impl fmt::Debug for Object {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0.try_borrow() {
            Ok(m) => fmt::Debug::fmt(&*m, f),
            Err(_) => f.write_str("Object(<borrowed>)"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::array;

    #[derive(Debug)]
    struct Point {
        x: i64,
        y: i64,
    }

    impl Model for Point {
        fn attributes(&self) -> Array {
            array! { "x" => self.x, "y" => self.y }
        }
    }

    #[derive(Debug)]
    struct Opaque;

    impl Model for Opaque {
        fn attributes(&self) -> Array {
            Array::new()
        }

        fn traverse(&self) -> Option<Array> {
            None
        }
    }

    #[test]
    fn identity_and_downcast() {
        let a = Object::new(Point { x: 1, y: 2 });
        let b = a.clone();
        let c = Object::new(Point { x: 1, y: 2 });
        assert!(a.ptr_eq(&b));
        assert!(!a.ptr_eq(&c));
        assert!(a.is::<Point>());
        assert!(!a.is::<Opaque>());

        b.downcast_mut::<Point>().unwrap().x = 10;
        assert_eq!(a.downcast_ref::<Point>().unwrap().x, 10);
        assert_eq!(a.type_name(), "Point");
    }

    #[test]
    fn export_filters_fields() {
        let p = Object::new(Point { x: 3, y: 4 });
        let only_y = p.to_array(&["y".to_string()], &[], false);
        assert_eq!(only_y, array! { "y" => 4 });
        assert_eq!(p.attribute("x"), Some(Value::Int(3)));
        assert!(p.is_traversable());
        assert!(!Object::new(Opaque).is_traversable());
    }

    #[derive(Debug)]
    struct Shape {
        corners: Array,
    }

    impl Model for Shape {
        fn attributes(&self) -> Array {
            array! { "corners" => self.corners.clone() }
        }
    }

    #[test]
    fn recursive_export_reaches_objects_in_nested_arrays() {
        let shape = Object::new(Shape {
            corners: array![Object::new(Point { x: 0, y: 1 }), array![Object::new(Point { x: 2, y: 3 })]],
        });

        let flat = shape.to_array(&[], &[], true);
        let expected = array! {
            "corners" => array![array! { "x" => 0, "y" => 1 }, array![array! { "x" => 2, "y" => 3 }]],
        };
        assert_eq!(flat, expected);

        let shallow = shape.to_array(&[], &[], false);
        let corners = shallow.get("corners").and_then(Value::as_array).cloned().unwrap_or_default();
        assert!(corners.values().next().is_some_and(|v| v.as_object().is_some()));
    }
}
