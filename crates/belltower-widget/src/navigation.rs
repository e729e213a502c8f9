use belltower_bridge::{host::Router, record::DocumentTarget};

/// Opens the document behind a notification.
///
/// Tries an in-app route change first and falls back to a location change
/// when the router refuses.
pub fn open_document(router: &dyn Router, target: &DocumentTarget) {
    match router.route(target) {
        Ok(()) => log::debug!(
            "Routed to {} {}",
            target.document_type,
            target.document_name
        ),
        Err(error) => {
            let path = target.url_path();
            log::warn!("In-app routing failed ({error}), falling back to {path}");
            router.assign_location(&path);
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use belltower_bridge::host::NavigationError;

    use super::*;

    #[derive(Default)]
    struct FlakyRouter {
        fail: bool,
        routes: Mutex<Vec<DocumentTarget>>,
        locations: Mutex<Vec<String>>,
    }

    impl Router for FlakyRouter {
        fn route(&self, target: &DocumentTarget) -> Result<(), NavigationError> {
            if self.fail {
                return Err(NavigationError::Unavailable);
            }
            self.routes.lock().unwrap().push(target.clone());
            Ok(())
        }

        fn assign_location(&self, path: &str) {
            self.locations.lock().unwrap().push(path.to_string());
        }
    }

    #[test]
    fn routes_in_app_when_possible() {
        let router = FlakyRouter::default();
        let target = DocumentTarget::new("Sales Invoice", "SINV-1");

        open_document(&router, &target);

        assert_eq!(*router.routes.lock().unwrap(), vec![target]);
        assert!(router.locations.lock().unwrap().is_empty());
    }

    #[test]
    fn falls_back_to_location_change() {
        let router = FlakyRouter {
            fail: true,
            ..FlakyRouter::default()
        };

        open_document(&router, &DocumentTarget::new("Sales Invoice", "SINV-1"));

        assert!(router.routes.lock().unwrap().is_empty());
        assert_eq!(
            *router.locations.lock().unwrap(),
            vec!["/app/sales-invoice/SINV-1".to_string()]
        );
    }
}
