// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Concurrent code-generation behavior.
//!
//! The adapter is shared the way the server shares it: behind a mutex,
//! one writer at a time. The locked highest-code read inside each
//! creation transaction is what keeps codes unique and contiguous.

use std::collections::BTreeSet;
use std::sync::{Arc, Mutex};
use std::thread;

use sereno::CreateNovedad;
use sereno_historial::Actor;

use crate::Persistence;
use crate::tests::helpers::{Fixture, create_valid_input, instante, setup, zona_test};

#[test]
fn test_concurrent_creates_produce_unique_contiguous_codes() {
    let fixture: Fixture = setup();
    let input: CreateNovedad = create_valid_input(&fixture);
    let actor: Actor = Actor::new(fixture.usuario_1);
    let persistence: Arc<Mutex<Persistence>> = Arc::new(Mutex::new(fixture.persistence));

    const HILOS: usize = 8;
    const POR_HILO: usize = 5;

    let mut handles = Vec::new();
    for _ in 0..HILOS {
        let persistence = Arc::clone(&persistence);
        let input = input.clone();
        handles.push(thread::spawn(move || {
            let mut codes: Vec<String> = Vec::new();
            for _ in 0..POR_HILO {
                let detalle = persistence
                    .lock()
                    .unwrap()
                    .create_novedad(&input, actor, instante(10, 0), zona_test())
                    .unwrap();
                codes.push(detalle.novedad.novedad_code);
            }
            codes
        }));
    }

    let mut todos: Vec<String> = Vec::new();
    for handle in handles {
        todos.extend(handle.join().unwrap());
    }

    // Unique...
    let unicos: BTreeSet<&String> = todos.iter().collect();
    assert_eq!(unicos.len(), HILOS * POR_HILO);

    // ...and a contiguous run from the starting max.
    let esperados: BTreeSet<String> = (1..=HILOS * POR_HILO).map(|n| format!("{n:06}")).collect();
    assert_eq!(
        todos.iter().cloned().collect::<BTreeSet<String>>(),
        esperados
    );
}
