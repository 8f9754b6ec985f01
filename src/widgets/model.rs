use crate::error::{Result, WidgetsError};
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A rectangle on the shared plane plus its stacking index.
///
/// Values handed out by a store are snapshots: mutating one never changes
/// what the store holds.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Widget {
    pub id: Uuid,
    pub x: i32,
    pub y: i32,
    pub z: i32,
    pub height: i32,
    pub width: i32,
    pub last_modification_date: DateTime<Utc>,
}

impl Widget {
    /// Stamps the widget as modified now.
    ///
    /// The new timestamp is always strictly later than the previous one, even
    /// when the system clock has not advanced since the last modification.
    pub fn touch(&mut self) {
        let now = Utc::now();
        self.last_modification_date = if now > self.last_modification_date {
            now
        } else {
            self.last_modification_date + Duration::nanoseconds(1)
        };
    }
}

/// A partial set of widget fields, used both to create and to update widgets.
///
/// On update, absent fields are left untouched. On create, `x`, `height` and
/// `width` are mandatory; an absent `y` becomes 0 and an absent `z` places the
/// widget above every existing one.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WidgetChangeSet {
    pub x: Option<i32>,
    pub y: Option<i32>,
    pub z: Option<i32>,
    pub height: Option<i32>,
    pub width: Option<i32>,
}

impl WidgetChangeSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_x(mut self, x: i32) -> Self {
        self.x = Some(x);
        self
    }

    pub fn with_y(mut self, y: i32) -> Self {
        self.y = Some(y);
        self
    }

    pub fn with_z(mut self, z: i32) -> Self {
        self.z = Some(z);
        self
    }

    pub fn with_height(mut self, height: i32) -> Self {
        self.height = Some(height);
        self
    }

    pub fn with_width(mut self, width: i32) -> Self {
        self.width = Some(width);
        self
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Checks the fields a new widget cannot do without.
    pub fn validate_for_create(&self) -> Result<()> {
        self.required_fields().map(|_| ())
    }

    /// Builds a brand new widget at `z`, ignoring the change set's own `z`.
    pub fn build_widget(&self, id: Uuid, z: i32) -> Result<Widget> {
        let (x, height, width) = self.required_fields()?;
        Ok(Widget {
            id,
            x,
            y: self.y.unwrap_or_default(),
            z,
            height,
            width,
            last_modification_date: Utc::now(),
        })
    }

    fn required_fields(&self) -> Result<(i32, i32, i32)> {
        let x = self.x.ok_or_else(|| missing("x coordinate"))?;
        let height = self.height.ok_or_else(|| missing("height"))?;
        let width = self.width.ok_or_else(|| missing("width"))?;
        Ok((x, height, width))
    }

    /// Overwrites the fields present in this change set.
    pub fn apply_to(&self, widget: &mut Widget) {
        if let Some(x) = self.x {
            widget.x = x;
        }
        if let Some(y) = self.y {
            widget.y = y;
        }
        if let Some(z) = self.z {
            widget.z = z;
        }
        if let Some(height) = self.height {
            widget.height = height;
        }
        if let Some(width) = self.width {
            widget.width = width;
        }
    }
}

fn missing(field: &str) -> WidgetsError {
    WidgetsError::InvalidChangeSet(format!("widget's {} is missing", field))
}
